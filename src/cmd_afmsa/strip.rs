use afmsa::libs::batch::{run_batch, strip_file, FailurePolicy, StripOptions};
use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("strip")
        .about("Blank the MSAs of selected chains in AlphaFold 3 job files")
        .after_help(
            r###"
Sets `unpairedMsa` and `pairedMsa` of the selected chains to empty strings and
writes `<outdir>/<stem without _data>_no_pep_msa.json` for every input.

Notes:
* Chains are positions in `sequences`, starting from 1
* --remove-templates also empties the chains' templates
* Inputs that are missing, not JSON, or lack the chain are skipped with a warning
* Fails only if no input could be processed

Examples:
1. Strip the second chain of several jobs:
   afmsa strip fold_a_data.json fold_b_data.json -o stripped/

2. Strip chains 2 and 3 including templates:
   afmsa strip job.json -c 2,3 -r

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input JSON file(s) to process"),
        )
        .arg(
            Arg::new("chains")
                .long("chains")
                .short('c')
                .num_args(1)
                .default_value("2")
                .help("Chain number(s) to strip, starting from 1, comma separated"),
        )
        .arg(
            Arg::new("remove_templates")
                .long("remove-templates")
                .short('r')
                .action(ArgAction::SetTrue)
                .help("Also remove templates from the selected chains"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .default_value(".")
                .help("Output directory"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infiles: Vec<&String> = args.get_many::<String>("infiles").unwrap().collect();
    let outdir = args.get_one::<String>("outdir").unwrap();
    let chains = args
        .get_one::<String>("chains")
        .unwrap()
        .split(',')
        .map(|s| s.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid chain numbers: {}", e))?;
    let opt = StripOptions {
        chains,
        remove_templates: args.get_flag("remove_templates"),
    };

    //----------------------------
    // Ops
    //----------------------------
    let done = run_batch(&infiles, FailurePolicy::SkipAndWarn, |infile| {
        strip_file(infile, outdir, &opt).map(|_| ())
    })?;

    if done == 0 {
        anyhow::bail!("No valid input files to process");
    }

    Ok(())
}
