//! Running a tool over many inputs, and the JSON chain-stripping edit.

use crate::libs::error::MsaError;
use crate::libs::io::out_path;
use crate::libs::job::{to_json_string, LocalJob};
use anyhow::Context;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// What a batch does when one input fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure aborts the batch
    FailFast,
    /// Failures are logged and the remaining inputs still run
    SkipAndWarn,
}

/// Runs `op` on every input under `policy` and returns how many succeeded.
pub fn run_batch<S, F>(inputs: &[S], policy: FailurePolicy, mut op: F) -> anyhow::Result<usize>
where
    S: AsRef<str>,
    F: FnMut(&str) -> anyhow::Result<()>,
{
    let mut done = 0;

    for input in inputs {
        let input = input.as_ref();
        match op(input) {
            Ok(()) => done += 1,
            Err(err) => match policy {
                FailurePolicy::FailFast => return Err(err),
                FailurePolicy::SkipAndWarn => log::warn!("Skipping {}: {:#}", input, err),
            },
        }
    }

    Ok(done)
}

/// Which chains lose their alignment data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOptions {
    /// 1-based positions in `sequences`
    pub chains: Vec<usize>,
    pub remove_templates: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            chains: vec![2],
            remove_templates: false,
        }
    }
}

/// Blanks `unpairedMsa` and `pairedMsa` of the selected chains and, when
/// asked, their templates. The job is renamed `<name>_nomsa` or
/// `<name>_nomsa_notemp`.
pub fn strip_job(job: &mut LocalJob, opt: &StripOptions) -> Result<(), MsaError> {
    let count = job.sequences.len();

    for &chain in &opt.chains {
        if chain == 0 || chain > count {
            return Err(MsaError::InvalidChain { chain, count });
        }
        let protein = job.sequences[chain - 1]
            .protein
            .as_mut()
            .ok_or_else(|| MsaError::MissingField(format!("sequences[{}].protein", chain - 1)))?;

        protein.unpaired_msa = Some(String::new());
        protein.paired_msa = Some(String::new());
        if opt.remove_templates {
            protein.templates = Some(Value::Array(vec![]));
        }
    }

    job.name = if opt.remove_templates {
        format!("{}_nomsa_notemp", job.name)
    } else {
        format!("{}_nomsa", job.name)
    };

    Ok(())
}

/// `<stem without "_data">_no_pep_msa.json`
///
/// ```
/// assert_eq!(afmsa::libs::batch::strip_output_name("out/fold_x_data.json"), "fold_x_no_pep_msa.json");
/// ```
pub fn strip_output_name(infile: &str) -> String {
    let stem = Path::new(infile)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}_no_pep_msa.json", stem.replace("_data", ""))
}

/// Strips one job file into `outdir`. Inputs that are missing, not `.json`
/// or not a local job are errors.
pub fn strip_file(infile: &str, outdir: &str, opt: &StripOptions) -> anyhow::Result<PathBuf> {
    let path = Path::new(infile);
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", infile);
    }
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", infile);
    }
    let is_json = path
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        anyhow::bail!("Not a JSON file: {}", infile);
    }

    let mut job = LocalJob::from_path(infile)?;
    strip_job(&mut job, opt).with_context(|| {
        format!("Could not find expected structure in {}", infile)
    })?;

    let outfile = out_path(outdir, &strip_output_name(infile))?;
    std::fs::write(&outfile, to_json_string(&job, 2)?)
        .with_context(|| format!("could not write {}", outfile.display()))?;

    log::info!("Successfully processed: {} -> {}", infile, outfile.display());
    Ok(outfile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> LocalJob {
        serde_json::from_str(
            r#"{
                "name": "fold_x",
                "modelSeeds": [1],
                "dialect": "alphafold3",
                "version": 2,
                "sequences": [
                    {"protein": {"id": "A", "sequence": "MKV", "unpairedMsa": ">a\nMKV", "pairedMsa": ">a\nMKV", "templates": [{"mmcif": "x"}]}},
                    {"protein": {"id": "B", "sequence": "GG", "unpairedMsa": ">b\nGG", "pairedMsa": "", "templates": [{"mmcif": "y"}]}},
                    {"ligand": {"id": "L", "ccdCodes": ["ATP"]}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_run_batch_policies() {
        let inputs = ["a", "bad", "c"];
        let op = |input: &str| {
            if input == "bad" {
                anyhow::bail!("broken")
            }
            Ok(())
        };

        assert_eq!(run_batch(&inputs, FailurePolicy::SkipAndWarn, op).unwrap(), 2);

        let mut seen = vec![];
        let err = run_batch(&inputs, FailurePolicy::FailFast, |input| {
            seen.push(input.to_string());
            op(input)
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "broken");
        assert_eq!(seen, vec!["a", "bad"]);
    }

    #[test]
    fn test_strip_job() {
        let mut job = job();
        strip_job(&mut job, &StripOptions::default()).unwrap();

        assert_eq!(job.name, "fold_x_nomsa");
        let proteins: Vec<_> = job.proteins().collect();
        assert_eq!(proteins[0].unpaired_msa.as_deref(), Some(">a\nMKV"));
        assert_eq!(proteins[1].unpaired_msa.as_deref(), Some(""));
        assert_eq!(proteins[1].paired_msa.as_deref(), Some(""));
        assert!(proteins[1].templates.as_ref().unwrap().as_array().unwrap().len() == 1);
    }

    #[test]
    fn test_strip_job_templates() {
        let mut job = job();
        let opt = StripOptions {
            chains: vec![1, 2],
            remove_templates: true,
        };
        strip_job(&mut job, &opt).unwrap();

        assert_eq!(job.name, "fold_x_nomsa_notemp");
        for protein in job.proteins() {
            assert_eq!(protein.unpaired_msa.as_deref(), Some(""));
            assert_eq!(protein.templates, Some(Value::Array(vec![])));
        }
    }

    #[test]
    fn test_strip_job_bad_chain() {
        let mut job = job();
        let opt = StripOptions {
            chains: vec![5],
            remove_templates: false,
        };
        assert_eq!(
            strip_job(&mut job, &opt).unwrap_err(),
            MsaError::InvalidChain { chain: 5, count: 3 }
        );

        let opt = StripOptions {
            chains: vec![3],
            remove_templates: false,
        };
        assert!(matches!(
            strip_job(&mut job, &opt).unwrap_err(),
            MsaError::MissingField(_)
        ));
    }

    #[test]
    fn test_strip_output_name() {
        assert_eq!(strip_output_name("x/job_data.json"), "job_no_pep_msa.json");
        assert_eq!(strip_output_name("job.json"), "job_no_pep_msa.json");
    }
}
