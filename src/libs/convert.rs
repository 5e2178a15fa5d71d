use crate::libs::a3m::{merge_chains, A3m, A3mHeader, ChainEntries, PerChainAlignment};
use crate::libs::error::MsaError;
use crate::libs::io::{basename, out_path, read_lines, with_suffix};
use crate::libs::job::{to_json_string, LocalJob, ServerJob};
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Settings of the A3M -> JSON direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToJsonOptions {
    pub outdir: String,
    pub suffix: String,
    /// Emit the server dialect instead of the local one
    pub server: bool,
    pub seeds: Vec<u64>,
    pub use_templates: bool,
    pub max_template_date: String,
    /// Write per-chain A3M files and reference them by path
    pub add_path: bool,
}

impl Default for ToJsonOptions {
    fn default() -> Self {
        Self {
            outdir: ".".to_string(),
            suffix: String::new(),
            server: false,
            seeds: vec![1],
            use_templates: true,
            max_template_date: "3000-01-01".to_string(),
            add_path: false,
        }
    }
}

/// Builds the job JSON for a parsed alignment.
///
/// The server dialect only carries the query segments. The local dialect
/// carries each chain's rows, inline or, with `add_path`, as the absolute
/// path of a per-chain file written next to the JSON.
pub fn a3m_to_json_string(a3m: &A3m, name: &str, opt: &ToJsonOptions) -> anyhow::Result<String> {
    let sequences = a3m.query_segments();

    if opt.server {
        let job = ServerJob::new(
            name,
            &sequences,
            &a3m.header,
            &opt.seeds,
            opt.use_templates,
            &opt.max_template_date,
        )?;
        return to_json_string(&vec![job], 4);
    }

    let per_chain = a3m.group_by_chain();
    let msas = if opt.add_path {
        write_chain_files(a3m, &per_chain, name, &opt.outdir)?
            .into_iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect()
    } else {
        per_chain.values().map(|rows| rows.join("\n")).collect::<Vec<_>>()
    };

    let job = LocalJob::new(name, &sequences, &msas, &a3m.header, &opt.seeds);
    to_json_string(&job, 4)
}

/// Writes `<name>_<chain>.a3m` for every chain and returns absolute paths.
///
/// Each file opens with the chain's own `#<length>\t<copies>` line, which is
/// the line a reader skips when it follows the reference.
pub fn write_chain_files(
    a3m: &A3m,
    per_chain: &PerChainAlignment,
    name: &str,
    outdir: &str,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = vec![];

    for (i, (chain, rows)) in per_chain.iter().enumerate() {
        let path = out_path(outdir, &format!("{}_{}.a3m", name, chain))?;
        let header = A3mHeader::new(vec![a3m.header.lengths[i]], vec![a3m.header.copies_of(i)]);

        let mut writer = crate::libs::io::writer(&path.to_string_lossy())?;
        writeln!(writer, "{}", header)?;
        for row in rows {
            writeln!(writer, "{}", row)?;
        }
        writer.flush()?;

        let path = std::fs::canonicalize(&path)
            .with_context(|| format!("could not resolve {}", path.display()))?;
        paths.push(path);
    }

    Ok(paths)
}

/// Converts `infile` (A3M) into `<outdir>/<basename>[_suffix].json`.
///
/// A query whose width does not match the header aborts before anything
/// is written.
pub fn a3m_file_to_json(infile: &str, opt: &ToJsonOptions) -> anyhow::Result<PathBuf> {
    let lines = read_lines(infile)?;
    let a3m = A3m::from_lines(&lines).with_context(|| format!("failed to parse {}", infile))?;

    let name = with_suffix(&basename(infile), &opt.suffix);
    let text = a3m_to_json_string(&a3m, &name, opt)?;

    let outfile = out_path(&opt.outdir, &format!("{}.json", name))?;
    std::fs::write(&outfile, text).with_context(|| format!("could not write {}", outfile.display()))?;

    log::info!("Processed {} -> {}", infile, outfile.display());
    Ok(outfile)
}

/// Per-chain declared length, copy count and classified hits of a job.
pub fn job_chains(job: &LocalJob) -> anyhow::Result<(A3mHeader, Vec<ChainEntries>)> {
    let mut header = A3mHeader::default();
    let mut chains = vec![];

    for entry in &job.sequences {
        let Some(protein) = &entry.protein else {
            log::warn!(
                "{}: skipping non-protein entry {:?}",
                job.name,
                entry.other.keys().collect::<Vec<_>>()
            );
            continue;
        };

        let rows = protein.msa_source().rows()?;
        header.lengths.push(protein.sequence.chars().count());
        header.copies.push(protein.copies());
        chains.push(ChainEntries::from_rows(&rows[..]));
    }

    if chains.is_empty() {
        return Err(MsaError::MissingField("protein".to_string()).into());
    }

    Ok((header, chains))
}

/// The merged alignment of a local job, one line per element.
pub fn job_to_a3m_lines(job: &LocalJob) -> anyhow::Result<Vec<String>> {
    let (header, chains) = job_chains(job)?;
    Ok(merge_chains(&chains, &header))
}

/// Converts `infile` (local-dialect JSON) into `<outdir>/<name>[_suffix].a3m`.
pub fn json_file_to_a3m(infile: &str, outdir: &str, suffix: &str) -> anyhow::Result<PathBuf> {
    let job = LocalJob::from_path(infile)?;
    let lines = job_to_a3m_lines(&job).with_context(|| format!("failed to convert {}", infile))?;

    let name = with_suffix(&job.name, suffix);
    let outfile = out_path(outdir, &format!("{}.a3m", name))?;

    let mut writer = crate::libs::io::writer(&outfile.to_string_lossy())?;
    for line in &lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    log::info!("Processed {} -> {}", infile, outfile.display());
    Ok(outfile)
}

/// Puts the rows of an externally computed alignment into a job: protein
/// `k` gets chain `k`'s rows as `unpairedMsa` and an empty `pairedMsa`.
pub fn attach_msa(job: &mut LocalJob, a3m: &A3m) -> Result<(), MsaError> {
    let proteins = job.proteins().count();
    if proteins != a3m.header.chain_count() {
        return Err(MsaError::ProteinCountMismatch {
            chains: a3m.header.chain_count(),
            proteins,
        });
    }

    let per_chain = a3m.group_by_chain();
    for (protein, rows) in job.proteins_mut().zip(per_chain.values()) {
        protein.unpaired_msa = Some(rows.join("\n"));
        protein.paired_msa = Some(String::new());
    }

    Ok(())
}

/// Direction of a conversion, chosen from the input's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    A3mToJson,
    JsonToA3m,
}

impl Direction {
    pub fn of(infile: &str) -> anyhow::Result<Self> {
        match Path::new(infile).extension().and_then(|e| e.to_str()) {
            Some("a3m") => Ok(Direction::A3mToJson),
            Some("json") => Ok(Direction::JsonToA3m),
            _ => anyhow::bail!("Input file must be either an A3M or JSON file: {}", infile),
        }
    }
}
