//! AlphaFold 3 job files.
//!
//! Two dialects describe the same job: the server submission shape
//! (a JSON array of jobs with `proteinChain` entries) and the local pipeline
//! shape (one object with `protein` entries that may carry MSAs).

use crate::libs::a3m::header::A3mHeader;
use crate::libs::error::MsaError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const SERVER_DIALECT: &str = "alphafoldserver";
pub const LOCAL_DIALECT: &str = "alphafold3";
pub const LOCAL_VERSION: &str = "2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerJob {
    pub model_seeds: Vec<u64>,
    pub name: String,
    pub dialect: String,
    pub version: u32,
    pub sequences: Vec<ServerSequence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSequence {
    pub protein_chain: ProteinChain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinChain {
    pub sequence: String,
    pub use_structure_template: bool,
    pub max_template_date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalJob {
    #[serde(default)]
    pub model_seeds: Vec<u64>,
    pub name: String,
    #[serde(default)]
    pub dialect: String,
    /// Written as `"2"`, but numeric versions are read back untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    pub sequences: Vec<LocalSequence>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `sequences`. Only proteins are modelled; ligands, nucleic
/// acids and anything else are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<Protein>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Protein {
    pub id: ChainId,
    pub sequence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpaired_msa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_msa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copies: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `"A"` or `["A", "B"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    One(String),
    Many(Vec<String>),
}

impl ChainId {
    pub fn count(&self) -> usize {
        match self {
            ChainId::One(_) => 1,
            ChainId::Many(ids) => ids.len(),
        }
    }
}

/// Chain letter for the 0-based chain `idx`: `A`, `B`, ...
pub fn chain_letter(idx: usize) -> String {
    char::from_u32(65 + idx as u32)
        .map(|c| c.to_string())
        .unwrap_or_else(|| format!("chain{}", idx + 1))
}

impl Protein {
    /// Declared copy count, falling back to the number of ids.
    pub fn copies(&self) -> usize {
        self.copies.unwrap_or_else(|| self.id.count())
    }

    /// Where this chain's `unpairedMsa` comes from.
    pub fn msa_source(&self) -> MsaSource {
        MsaSource::resolve(self.unpaired_msa.as_deref().unwrap_or(""))
    }
}

/// The content of an `unpairedMsa` field: either the alignment text itself
/// or the path of a per-chain A3M file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsaSource {
    Inline(String),
    FileReference(PathBuf),
}

impl MsaSource {
    /// A single-line value naming an existing file is a reference; anything
    /// else is inline text.
    pub fn resolve(field: &str) -> Self {
        let candidate = field.trim();
        if !candidate.is_empty() && !candidate.contains('\n') && Path::new(candidate).is_file() {
            MsaSource::FileReference(PathBuf::from(candidate))
        } else {
            MsaSource::Inline(field.to_string())
        }
    }

    /// Non-empty, trimmed alignment rows. A referenced file loses its first
    /// line, the per-chain `#` header.
    pub fn rows(&self) -> anyhow::Result<Vec<String>> {
        let rows = match self {
            MsaSource::Inline(text) => text
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
            MsaSource::FileReference(path) => {
                let path = path.to_string_lossy();
                crate::libs::io::read_lines(&path)?
                    .into_iter()
                    .skip(1)
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .collect()
            }
        };
        Ok(rows)
    }
}

impl ServerJob {
    /// A server job from the query segments of an alignment. The server
    /// accepts a single seed only.
    pub fn new(
        name: &str,
        sequences: &[&str],
        header: &A3mHeader,
        seeds: &[u64],
        use_templates: bool,
        max_template_date: &str,
    ) -> Result<Self, MsaError> {
        if seeds.len() > 1 {
            return Err(MsaError::TooManySeeds(seeds.len()));
        }

        Ok(Self {
            model_seeds: seeds.to_vec(),
            name: name.to_string(),
            dialect: SERVER_DIALECT.to_string(),
            version: 1,
            sequences: sequences
                .iter()
                .enumerate()
                .map(|(i, seq)| ServerSequence {
                    protein_chain: ProteinChain {
                        sequence: seq.to_string(),
                        use_structure_template: use_templates,
                        max_template_date: max_template_date.to_string(),
                        count: header.copies_of(i),
                    },
                })
                .collect(),
        })
    }
}

impl LocalJob {
    /// A local job with one protein per chain. `msas[i]` is written
    /// verbatim into `unpairedMsa`; `pairedMsa` stays empty so the pipeline
    /// does not pair again.
    pub fn new(
        name: &str,
        sequences: &[&str],
        msas: &[String],
        header: &A3mHeader,
        seeds: &[u64],
    ) -> Self {
        Self {
            model_seeds: seeds.to_vec(),
            name: name.to_string(),
            dialect: LOCAL_DIALECT.to_string(),
            version: Some(Value::String(LOCAL_VERSION.to_string())),
            sequences: sequences
                .iter()
                .enumerate()
                .map(|(i, seq)| LocalSequence {
                    protein: Some(Protein {
                        id: ChainId::Many(vec![chain_letter(i)]),
                        sequence: seq.to_string(),
                        unpaired_msa: Some(msas.get(i).cloned().unwrap_or_default()),
                        paired_msa: Some(String::new()),
                        copies: Some(header.copies_of(i)),
                        templates: None,
                        extra: Map::new(),
                    }),
                    other: Map::new(),
                })
                .collect(),
            extra: Map::new(),
        }
    }

    pub fn from_path(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path))?;
        let job = serde_json::from_str(&text)
            .with_context(|| format!("invalid job JSON in {}", path))?;
        Ok(job)
    }

    pub fn proteins(&self) -> impl Iterator<Item = &Protein> {
        self.sequences.iter().filter_map(|s| s.protein.as_ref())
    }

    pub fn proteins_mut(&mut self) -> impl Iterator<Item = &mut Protein> {
        self.sequences.iter_mut().filter_map(|s| s.protein.as_mut())
    }
}

/// Serializes `value` pretty-printed with `indent` spaces.
pub fn to_json_string<T: Serialize>(value: &T, indent: usize) -> anyhow::Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_server_job() {
        let header = A3mHeader::new(vec![3, 2], vec![2, 1]);
        let job = ServerJob::new("job", &["ABC", "DE"], &header, &[7], true, "2021-09-30").unwrap();

        let json = serde_json::to_value(vec![job]).unwrap();
        assert_eq!(json[0]["dialect"], "alphafoldserver");
        assert_eq!(json[0]["version"], 1);
        assert_eq!(json[0]["modelSeeds"][0], 7);
        let chain = &json[0]["sequences"][0]["proteinChain"];
        assert_eq!(chain["sequence"], "ABC");
        assert_eq!(chain["useStructureTemplate"], true);
        assert_eq!(chain["maxTemplateDate"], "2021-09-30");
        assert_eq!(chain["count"], 2);
    }

    #[test]
    fn test_server_job_seeds() {
        let header = A3mHeader::new(vec![3], vec![1]);
        let err = ServerJob::new("job", &["ABC"], &header, &[1, 2], true, "3000-01-01").unwrap_err();
        assert_eq!(err, MsaError::TooManySeeds(2));
    }

    #[test]
    fn test_local_job() {
        let header = A3mHeader::new(vec![3, 2], vec![1, 3]);
        let msas = vec![">101\t102\nABC".to_string(), ">101\t102\nDE".to_string()];
        let job = LocalJob::new("job", &["ABC", "DE"], &msas, &header, &[1, 2]);

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["dialect"], "alphafold3");
        assert_eq!(json["version"], "2");
        let protein = &json["sequences"][1]["protein"];
        assert_eq!(protein["id"][0], "B");
        assert_eq!(protein["unpairedMsa"], ">101\t102\nDE");
        assert_eq!(protein["pairedMsa"], "");
        assert_eq!(protein["copies"], 3);
        assert!(protein.get("templates").is_none());
    }

    #[test]
    fn test_local_job_keeps_unknown_fields() {
        let text = r#"{
            "name": "x",
            "modelSeeds": [1],
            "dialect": "alphafold3",
            "version": 2,
            "bondedAtomPairs": [],
            "sequences": [
                {"protein": {"id": "A", "sequence": "MKV", "modifications": []}},
                {"ligand": {"id": "L", "ccdCodes": ["ATP"]}}
            ]
        }"#;
        let job: LocalJob = serde_json::from_str(text).unwrap();
        assert_eq!(job.proteins().count(), 1);
        assert_eq!(job.proteins().next().unwrap().copies(), 1);

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["version"], 2);
        assert!(json["bondedAtomPairs"].is_array());
        assert!(json["sequences"][0]["protein"]["modifications"].is_array());
        assert_eq!(json["sequences"][1]["ligand"]["ccdCodes"][0], "ATP");
    }

    #[test]
    fn test_copies_from_ids() {
        let protein: Protein =
            serde_json::from_str(r#"{"id": ["A", "B", "C"], "sequence": "MKV"}"#).unwrap();
        assert_eq!(protein.copies(), 3);
        assert_eq!(protein.msa_source(), MsaSource::Inline(String::new()));
        assert!(protein.msa_source().rows().unwrap().is_empty());
    }

    #[test]
    fn test_msa_source() {
        let inline = MsaSource::resolve(">101\t102\nABC\n\n>hit\nAB-\n");
        assert_eq!(
            inline.rows().unwrap(),
            vec![">101\t102", "ABC", ">hit", "AB-"]
        );

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "#3\t1\n>101\t102\nABC\n>hit\nAB-\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let source = MsaSource::resolve(&path);
        assert_eq!(source, MsaSource::FileReference(PathBuf::from(&path)));
        assert_eq!(source.rows().unwrap(), vec![">101\t102", "ABC", ">hit", "AB-"]);

        // a single line that is not a file stays inline
        let source = MsaSource::resolve("tests/json/no_such_file.a3m");
        assert!(matches!(source, MsaSource::Inline(_)));
    }

    #[test]
    fn test_to_json_string_indent() {
        let text = to_json_string(&serde_json::json!({"a": [1]}), 4).unwrap();
        assert_eq!(text, "{\n    \"a\": [\n        1\n    ]\n}");
    }

    #[test]
    fn test_chain_letter() {
        assert_eq!(chain_letter(0), "A");
        assert_eq!(chain_letter(2), "C");
    }
}
