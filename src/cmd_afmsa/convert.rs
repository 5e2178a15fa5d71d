use afmsa::libs::convert::{a3m_file_to_json, json_file_to_a3m, Direction};
use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("convert")
        .about("Convert between A3M and JSON, picking the direction by extension")
        .after_help(
            r###"
`.a3m` inputs go through `to-json`, `.json` inputs through `to-a3m`.
Options that only apply to one direction are ignored by the other.

Examples:
1. A3M to a local job:
   afmsa convert tests/a3m/dimer.a3m -o out/

2. Back again:
   afmsa convert out/dimer.json -o out/ -s back

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input A3M or JSON file"),
        )
        .args(super::to_json::json_args())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let opt = super::to_json::json_options(args)?;

    match Direction::of(infile)? {
        Direction::A3mToJson => a3m_file_to_json(infile, &opt)?,
        Direction::JsonToA3m => json_file_to_a3m(infile, &opt.outdir, &opt.suffix)?,
    };

    Ok(())
}
