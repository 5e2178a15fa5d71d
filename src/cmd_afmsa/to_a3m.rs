use afmsa::libs::convert::json_file_to_a3m;
use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("to-a3m")
        .about("Convert an AlphaFold 3 job to a multi-chain A3M file")
        .after_help(
            r###"
This subcommand merges the per-chain MSAs of a local AlphaFold 3 job into one
ColabFold style A3M, `<outdir>/<name>[_suffix].a3m`.

Notes:
* Rows whose header has a tab and no `E+`/`E-` marker are paired across chains
* Paired rows are ordered by header; chains lacking a header get a gap run
* Unpaired rows keep their order and are padded with gaps to the full width
* `unpairedMsa` may hold the alignment itself or the path of a per-chain A3M file
* Non-protein entries are skipped

Examples:
1. Convert a job:
   afmsa to-a3m tests/json/dimer.json -o out/

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input JSON file"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .default_value(".")
                .help("Output directory"),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .short('s')
                .num_args(1)
                .help("Append a string to the output name, before the extension"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let outdir = args.get_one::<String>("outdir").unwrap();
    let suffix = args
        .get_one::<String>("suffix")
        .map(|s| s.as_str())
        .unwrap_or("");

    json_file_to_a3m(infile, outdir, suffix)?;

    Ok(())
}
