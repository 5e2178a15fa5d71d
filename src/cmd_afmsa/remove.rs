use afmsa::libs::io::{basename, out_path, read_lines};
use afmsa::{remove_chain, ChainIds};
use anyhow::Context;
use clap::*;
use std::io::Write;
use std::path::Path;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("remove")
        .about("Remove a chain's MSA from an A3M file")
        .after_help(
            r###"
Drops the unpaired block of one chain (`>101`, `>102`, ... headers) and writes
`<outdir>/<basename>_nomsa.a3m`.

Notes:
* Chains are numbered from 1
* With more than two chains, the chain's columns of the paired hits become gaps;
  the query row is kept
* With two chains, the whole paired block is dropped
* The row width and the header line are unchanged
* Nothing is written if the chain number is 0 or larger than the chain count

Examples:
1. Remove the peptide (second chain) of a dimer:
   afmsa remove tests/a3m/dimer.a3m -c 2

2. Write into another directory:
   afmsa remove tests/a3m/trimer.a3m -c 2 -o out/

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input A3M file"),
        )
        .arg(
            Arg::new("chain")
                .long("chain")
                .short('c')
                .required(true)
                .num_args(1)
                .value_parser(value_parser!(usize))
                .help("Chain number to remove (starting from 1)"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .help("Output directory [default: same as the input]"),
        )
        .arg(
            Arg::new("id_offset")
                .long("id-offset")
                .num_args(1)
                .default_value("100")
                .value_parser(value_parser!(usize))
                .help("Chain k is labelled `>{offset + k}` in headers"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let chain = *args.get_one::<usize>("chain").unwrap();
    let ids = ChainIds::new(*args.get_one::<usize>("id_offset").unwrap());
    let outdir = match args.get_one::<String>("outdir") {
        Some(dir) => dir.to_string(),
        None => match Path::new(infile).parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().to_string(),
            _ => ".".to_string(),
        },
    };

    //----------------------------
    // Ops
    //----------------------------
    let lines = read_lines(infile)?;
    let out = remove_chain(&lines, chain, ids).with_context(|| format!("failed on {}", infile))?;

    //----------------------------
    // Output
    //----------------------------
    let outfile = out_path(&outdir, &format!("{}_nomsa.a3m", basename(infile)))?;
    let mut writer = afmsa::writer(&outfile.to_string_lossy())?;
    for line in &out {
        writer.write_all(format!("{}\n", line).as_ref())?;
    }
    writer.flush()?;

    log::info!("New a3m file written to {}", outfile.display());

    Ok(())
}
