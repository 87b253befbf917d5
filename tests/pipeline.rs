use mispar_core::core::encoder::{HAAKHOR, HECHRECHI};
use mispar_core::persistence::OutputFormat;
use mispar_core::{MisparConfig, Pipeline, PipelineError};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LEXICON: &str = r#"{
    "H1": {"lemma": "אָב", "xlit": "ʼâb"},
    "H2": {"lemma": "אֵב"},
    "H1323": {"lemma": "בַּת"},
    "H517": {"lemma": "אֵם"},
    "H1004": {"lemma": "בַּיִת"},
    "H7965": {"lemma": "שָׁלוֹם"}
}"#;

fn setup(lexicon: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("strongs.json"), lexicon).unwrap();
    dir
}

fn config(dir: &Path, out: &str) -> MisparConfig {
    MisparConfig {
        input: Some(dir.join("strongs.json")),
        output_dir: Some(dir.join(out)),
        ..Default::default()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Walks a JSON document as written and fails on any object whose keys are
/// not strictly ascending. Parsing into `Value` would re-sort them first.
struct SortedKeys;

impl<'de> Deserialize<'de> for SortedKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SortedKeysVisitor)
    }
}

struct SortedKeysVisitor;

impl<'de> Visitor<'de> for SortedKeysVisitor {
    type Value = SortedKeys;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<SortedKeys, E> {
        Ok(SortedKeys)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<SortedKeys, E> {
        Ok(SortedKeys)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<SortedKeys, E> {
        Ok(SortedKeys)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<SortedKeys, E> {
        Ok(SortedKeys)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<SortedKeys, E> {
        Ok(SortedKeys)
    }

    fn visit_unit<E: de::Error>(self) -> Result<SortedKeys, E> {
        Ok(SortedKeys)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SortedKeys, A::Error> {
        while seq.next_element::<SortedKeys>()?.is_some() {}
        Ok(SortedKeys)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SortedKeys, A::Error> {
        let mut previous: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            if let Some(prev) = &previous {
                if prev.as_str() >= key.as_str() {
                    return Err(de::Error::custom(format!("key {key:?} follows {prev:?}")));
                }
            }
            map.next_value::<SortedKeys>()?;
            previous = Some(key);
        }
        Ok(SortedKeys)
    }
}

fn assert_keys_sorted(path: &Path) {
    let text = fs::read_to_string(path).unwrap();
    if let Err(err) = serde_json::from_str::<SortedKeys>(&text) {
        panic!("{}: {err}", path.display());
    }
}

#[test]
fn two_spellings_of_one_form_become_one_word() {
    let dir = setup(r#"{ "H1": {"lemma": "אָב"}, "H2": {"lemma": "אֵב"} }"#);
    let summary = Pipeline::from_config(&config(dir.path(), "out")).unwrap().run().unwrap();
    assert_eq!(summary.entries, 2);
    assert_eq!(summary.words, 1);

    let words = read_json(&dir.path().join("out/words.json"));
    let words = words.as_object().unwrap();
    assert_eq!(words.len(), 1);
    let word = &words["אב"];
    assert_eq!(word["diacritics"].as_array().unwrap().len(), 2);
    // tsere (U+05B5) sorts before qamats (U+05B8)
    assert_eq!(word["diacritics"][0]["spelling"], "אֵב");
    assert_eq!(word["diacritics"][0]["lexicon_id"], 2);
    assert_eq!(word["diacritics"][1]["spelling"], "אָב");
    assert_eq!(word["encodings"][HECHRECHI]["value"], 3);
    assert_eq!(word["encodings"][HECHRECHI]["equivalence_class"], 3);
    assert_eq!(word["encodings"][HAAKHOR]["value"], 21);
}

#[test]
fn writes_every_document() {
    let dir = setup(LEXICON);
    let summary = Pipeline::from_config(&config(dir.path(), "out")).unwrap().run().unwrap();
    let mut names: Vec<String> = summary
        .files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["diacritics.json", "gadol.json", "haakhor.json", "hechrechi.json", "words.json"]
    );

    let diacritics = read_json(&dir.path().join("out/diacritics.json"));
    assert_eq!(diacritics["1004"]["spelling"], "בַּיִת");
    assert_eq!(diacritics["1004"]["form"], "בית");

    // אב = 3, so it sits under letter א, class 3
    let face = read_json(&dir.path().join("out/hechrechi.json"));
    assert_eq!(face["א"]["3"][0]["form"], "אב");
}

#[test]
fn every_object_has_sorted_keys() {
    let dir = setup(LEXICON);
    Pipeline::from_config(&config(dir.path(), "out")).unwrap().run().unwrap();
    for name in ["words.json", "diacritics.json", "hechrechi.json", "haakhor.json"] {
        assert_keys_sorted(&dir.path().join("out").join(name));
    }

    // field order in the file itself, not just in a re-parsed Value
    let words = fs::read_to_string(dir.path().join("out/words.json")).unwrap();
    let at = |key: &str| words.find(&format!("\"{key}\"")).unwrap();
    assert!(at("diacritics") < at("encodings"));
    assert!(at("encodings") < at("form"));
}

#[test]
fn forty_letter_form_is_written_in_full() {
    let long: String = std::iter::repeat('א').take(40).collect();
    let dir = setup(&format!(r#"{{ "H1": {{"lemma": "{long}"}} }}"#));
    let settings = MisparConfig { schemes: Some(vec![HAAKHOR.to_string()]), ..config(dir.path(), "out") };
    Pipeline::from_config(&settings).unwrap().run().unwrap();

    let words = fs::read_to_string(dir.path().join("out/words.json")).unwrap();
    assert!(words.contains(&format!("\"value\": {}", "1".repeat(40))));
    assert!(words.contains("\"equivalence_class\": 5"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = setup(LEXICON);
    Pipeline::from_config(&config(dir.path(), "a")).unwrap().run().unwrap();
    Pipeline::from_config(&config(dir.path(), "b")).unwrap().run().unwrap();
    for name in ["diacritics.json", "words.json", "hechrechi.json", "gadol.json", "haakhor.json"] {
        let a = fs::read(dir.path().join("a").join(name)).unwrap();
        let b = fs::read(dir.path().join("b").join(name)).unwrap();
        assert_eq!(a, b, "{name}");
    }
}

#[test]
fn reordered_input_gives_the_same_output() {
    let forward = setup(r#"{"H1": {"lemma": "אָב"}, "H2": {"lemma": "אֵב"}, "H3": {"lemma": "בַּת"}}"#);
    let backward = setup(r#"{"H3": {"lemma": "בַּת"}, "H2": {"lemma": "אֵב"}, "H1": {"lemma": "אָב"}}"#);
    Pipeline::from_config(&config(forward.path(), "out")).unwrap().run().unwrap();
    Pipeline::from_config(&config(backward.path(), "out")).unwrap().run().unwrap();
    assert_eq!(
        fs::read(forward.path().join("out/words.json")).unwrap(),
        fs::read(backward.path().join("out/words.json")).unwrap()
    );
}

#[test]
fn js_and_bincode_formats() {
    let dir = setup(LEXICON);
    let settings = MisparConfig {
        formats: Some(vec![OutputFormat::JsModule, OutputFormat::Bincode]),
        schemes: Some(vec![HECHRECHI.to_string()]),
        ..config(dir.path(), "out")
    };
    let summary = Pipeline::from_config(&settings).unwrap().run().unwrap();
    assert_eq!(summary.files.len(), 6);

    let module = fs::read_to_string(dir.path().join("out/words.js")).unwrap();
    assert!(module.starts_with("export default {"));
    assert!(dir.path().join("out/hechrechi.bin").exists());
    assert!(!dir.path().join("out/haakhor.js").exists());
}

#[test]
fn malformed_record_fails_without_touching_outputs() {
    let dir = setup(LEXICON);
    Pipeline::from_config(&config(dir.path(), "out")).unwrap().run().unwrap();
    let before = fs::read(dir.path().join("out/words.json")).unwrap();

    fs::write(
        dir.path().join("strongs.json"),
        r#"{"H1": {"lemma": "אָב"}, "H2": {"xlit": "no lemma"}}"#,
    )
    .unwrap();
    let err = Pipeline::from_config(&config(dir.path(), "out")).unwrap().run().unwrap_err();
    assert!(matches!(err, PipelineError::Load(_)));
    assert_eq!(fs::read(dir.path().join("out/words.json")).unwrap(), before);
}

#[test]
fn custom_base_changes_classes() {
    let dir = setup(r#"{ "H1": {"lemma": "אָב"} }"#);
    let settings = MisparConfig { base: Some(2), ..config(dir.path(), "out") };
    Pipeline::from_config(&settings).unwrap().run().unwrap();
    let words = read_json(&dir.path().join("out/words.json"));
    assert_eq!(words["אב"]["encodings"][HECHRECHI]["equivalence_class"], 1);
    assert_eq!(words["אב"]["encodings"][HAAKHOR]["equivalence_class"], 1);
}
