use afmsa::libs::convert::{a3m_file_to_json, ToJsonOptions};
use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("to-json")
        .about("Convert a multi-chain A3M file to an AlphaFold 3 job")
        .after_help(
            r###"
This subcommand splits a multi-chain A3M (ColabFold style, first line `#<lengths>\t<copies>`)
into one alignment per chain and writes an AlphaFold 3 job, `<outdir>/<basename>[_suffix].json`.

Notes:
* The local dialect (default) carries every chain's rows in `unpairedMsa` and an empty `pairedMsa`
* --server writes the AlphaFold Server dialect, which carries sequences only and accepts one seed
* --add-path writes `<name>_<chain>.a3m` files into the output directory and stores their paths
* The query's width must equal the sum of the declared lengths; nothing is written otherwise

Examples:
1. Local job next to the input:
   afmsa to-json tests/a3m/dimer.a3m -o .

2. Server job without templates:
   afmsa to-json tests/a3m/dimer.a3m --server --no-templates -o out/

3. Compact job with per-chain files:
   afmsa to-json tests/a3m/trimer.a3m --add-path -s compact -o out/

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input A3M file"),
        )
        .args(json_args())
}

/// Options shared with `convert`
pub fn json_args() -> Vec<Arg> {
    vec![
        Arg::new("outdir")
            .long("outdir")
            .short('o')
            .num_args(1)
            .default_value(".")
            .help("Output directory"),
        Arg::new("suffix")
            .long("suffix")
            .short('s')
            .num_args(1)
            .help("Append a string to the output name, before the extension"),
        Arg::new("server")
            .long("server")
            .short('r')
            .action(ArgAction::SetTrue)
            .help("Use the AlphaFold Server dialect"),
        Arg::new("seeds")
            .long("seeds")
            .short('e')
            .num_args(1)
            .default_value("1")
            .help("Model seeds, comma separated"),
        Arg::new("no_templates")
            .long("no-templates")
            .short('n')
            .action(ArgAction::SetTrue)
            .help("Do not use templates on the server"),
        Arg::new("max_temp_date")
            .long("max-temp-date")
            .short('m')
            .num_args(1)
            .default_value("3000-01-01")
            .help("Max template date on the server"),
        Arg::new("add_path")
            .long("add-path")
            .short('p')
            .action(ArgAction::SetTrue)
            .help("Write per-chain A3M files and reference them instead of inlining the MSA"),
    ]
}

pub fn json_options(args: &ArgMatches) -> anyhow::Result<ToJsonOptions> {
    let seeds = args
        .get_one::<String>("seeds")
        .unwrap()
        .split(',')
        .map(|s| s.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid seeds: {}", e))?;

    Ok(ToJsonOptions {
        outdir: args.get_one::<String>("outdir").unwrap().to_string(),
        suffix: args
            .get_one::<String>("suffix")
            .map(|s| s.to_string())
            .unwrap_or_default(),
        server: args.get_flag("server"),
        seeds,
        use_templates: !args.get_flag("no_templates"),
        max_template_date: args.get_one::<String>("max_temp_date").unwrap().to_string(),
        add_path: args.get_flag("add_path"),
    })
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let opt = json_options(args)?;

    //----------------------------
    // Ops
    //----------------------------
    a3m_file_to_json(infile, &opt)?;

    Ok(())
}
