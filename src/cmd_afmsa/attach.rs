use afmsa::libs::convert::attach_msa;
use afmsa::libs::io::read_lines;
use afmsa::libs::job::{to_json_string, LocalJob};
use afmsa::A3m;
use anyhow::Context;
use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("attach")
        .about("Put a multi-chain A3M into an existing AlphaFold 3 job")
        .after_help(
            r###"
Splits a ColabFold style A3M (e.g. the result of an MMseqs2 search) by chain and
stores chain k's rows as `unpairedMsa` of the k-th protein. `pairedMsa` is set to
an empty string so that the pipeline does not pair the chains again.

Notes:
* The job must contain as many proteins as the A3M declares chains
* Non-protein entries and unknown fields are kept as they are

Examples:
1. Attach and print:
   afmsa attach job.json job.a3m

2. Write to a file:
   afmsa attach job.json job.a3m -o job_paired.json

"###,
        )
        .arg(
            Arg::new("job")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input JSON job"),
        )
        .arg(
            Arg::new("a3m")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Input A3M file"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let job_file = args.get_one::<String>("job").unwrap();
    let a3m_file = args.get_one::<String>("a3m").unwrap();

    //----------------------------
    // Ops
    //----------------------------
    let mut job = LocalJob::from_path(job_file)?;
    let a3m = A3m::from_lines(read_lines(a3m_file)?)
        .with_context(|| format!("failed to parse {}", a3m_file))?;
    attach_msa(&mut job, &a3m).with_context(|| format!("cannot attach {} to {}", a3m_file, job_file))?;

    //----------------------------
    // Output
    //----------------------------
    let mut writer = afmsa::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_all(to_json_string(&job, 4)?.as_ref())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
