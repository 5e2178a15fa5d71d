extern crate clap;
use clap::*;

mod cmd_afmsa;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let app = Command::new("afmsa")
        .version(crate_version!())
        .about("`afmsa` - AlphaFold MSA refiner")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_afmsa::convert::make_subcommand())
        .subcommand(cmd_afmsa::to_json::make_subcommand())
        .subcommand(cmd_afmsa::to_a3m::make_subcommand())
        .subcommand(cmd_afmsa::attach::make_subcommand())
        .subcommand(cmd_afmsa::remove::make_subcommand())
        .subcommand(cmd_afmsa::strip::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Conversion:
    * convert - A3M <-> JSON, direction picked by extension
    * to-json - Multi-chain A3M to an AlphaFold 3 job
    * to-a3m  - AlphaFold 3 job to a multi-chain A3M
    * attach  - Put an A3M into an existing job

* Editing:
    * remove  - Remove one chain's MSA from an A3M
    * strip   - Blank chains' MSAs in job files

"###,
        );

    match app.get_matches().subcommand() {
        Some(("convert", sub_matches)) => cmd_afmsa::convert::execute(sub_matches),
        Some(("to-json", sub_matches)) => cmd_afmsa::to_json::execute(sub_matches),
        Some(("to-a3m", sub_matches)) => cmd_afmsa::to_a3m::execute(sub_matches),
        Some(("attach", sub_matches)) => cmd_afmsa::attach::execute(sub_matches),
        Some(("remove", sub_matches)) => cmd_afmsa::remove::execute(sub_matches),
        Some(("strip", sub_matches)) => cmd_afmsa::strip::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
