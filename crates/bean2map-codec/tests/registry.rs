//! Registry and manifest loading tests

mod common;

use bean2map_codec::{
    BeanCodec, CodecCatalog, CodecError, CodecRegistry, CodecResult, ManifestSource, ManifestWarning,
    MapCodec, bulk_load,
};
use bean2map_types::{Value, ValueMap};
use common::{Parent, Simple};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;

fn catalog() -> CodecCatalog {
    let mut catalog = CodecCatalog::new();
    catalog
        .add_entity::<Parent>("com.example.ParentCodec")
        .add_entity::<Simple>("com.example.SimpleCodec")
        .add("com.example.BrokenCodec", |_| {
            Err(CodecError::ConverterNotFound("Broken".to_string()))
        });
    catalog
}

fn simple_codec() -> Arc<dyn MapCodec<Simple>> {
    Arc::new(BeanCodec::<Simple>::from_resolver(&common::resolver()).unwrap())
}

/// Codec that encodes every entity to a fixed marker map
struct MarkerCodec(&'static str);

impl MapCodec<Simple> for MarkerCodec {
    fn encode(&self, _entity: &Simple) -> ValueMap {
        let mut map = ValueMap::new();
        map.insert("marker".to_string(), Value::string(self.0));
        map
    }

    fn decode(&self, _map: &ValueMap) -> CodecResult<Simple> {
        Ok(Simple::default())
    }

    fn filter(&self, _map: &ValueMap) -> ValueMap {
        ValueMap::new()
    }
}

// === register / lookup ===

#[test]
fn test_lookup_absent_returns_none() {
    let registry = CodecRegistry::new();
    assert!(registry.lookup::<Simple>().is_none());
    assert!(registry.is_empty());
    assert_eq!(
        registry.require::<Simple>().err().unwrap(),
        CodecError::ConverterNotFound("Simple".to_string())
    );
}

#[test]
fn test_register_and_lookup() {
    let registry = CodecRegistry::new();
    assert!(registry.register(simple_codec()).is_none());

    let codec = registry.lookup::<Simple>().unwrap();
    assert_eq!(
        codec.encode(&common::sample())["id"],
        Value::string("111")
    );
    assert!(registry.lookup::<Parent>().is_none());
    assert!(registry.contains::<Simple>());
    assert_eq!(registry.type_names(), vec!["Simple"]);
}

#[test]
fn test_last_registration_wins() {
    let registry = CodecRegistry::new();
    registry.register::<Simple>(Arc::new(MarkerCodec("first")));
    let replaced = registry.register::<Simple>(Arc::new(MarkerCodec("second")));
    assert_eq!(replaced.map(|c| c.type_name()), Some("Simple"));

    let codec = registry.require::<Simple>().unwrap();
    assert_eq!(
        codec.encode(&Simple::default())["marker"],
        Value::string("second")
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_lookup_by_name_filters_without_type() {
    let registry = CodecRegistry::new();
    registry.register(simple_codec());

    let erased = registry.lookup_by_name("Simple").unwrap();
    let mut input = ValueMap::new();
    input.insert("id".to_string(), Value::string("1"));
    input.insert("other".to_string(), Value::Long(2));
    let filtered = erased.filter(&input);
    assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["id"]);

    assert!(erased.downcast::<Simple>().is_some());
    assert!(erased.downcast::<Parent>().is_none());
    assert!(registry.lookup_by_name("Missing").is_none());
}

#[test]
fn test_concurrent_registration_and_lookup() {
    let registry = CodecRegistry::new();
    std::thread::scope(|scope| {
        for i in 0..8 {
            let registry = &registry;
            scope.spawn(move || {
                if i % 2 == 0 {
                    registry.register::<Simple>(Arc::new(MarkerCodec("simple")));
                } else {
                    registry.register::<Parent>(Arc::new(
                        BeanCodec::<Parent>::from_resolver(&common::resolver()).unwrap(),
                    ));
                }
                let _ = registry.lookup::<Simple>();
            });
        }
    });
    assert_eq!(registry.type_names(), vec!["Parent", "Simple"]);
}

// === manifests ===

#[test]
fn test_initialize_from_inline_manifest() {
    let sources = vec![ManifestSource::inline(
        "builtin",
        "# codecs\ncom.example.ParentCodec\ncom.example.SimpleCodec\n",
    )];
    let (registry, report) = CodecRegistry::initialize(&catalog(), &common::resolver(), &sources);

    assert!(report.is_clean());
    assert_eq!(
        report.registered,
        vec!["com.example.ParentCodec", "com.example.SimpleCodec"]
    );
    assert!(registry.lookup::<Parent>().is_some());
    assert!(registry.lookup::<Simple>().is_some());
}

#[test]
fn test_bad_entries_do_not_abort_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "com.example.UnknownCodec\r\ncom.example.BrokenCodec\r\n\r\ncom.example.SimpleCodec\r\n"
    )
    .unwrap();

    let sources = vec![
        ManifestSource::file("/nonexistent/bean2map/codecs"),
        ManifestSource::file(file.path()),
        ManifestSource::inline("extra", "com.example.ParentCodec"),
    ];
    let registry = CodecRegistry::new();
    let report = bulk_load(&registry, &catalog(), &common::resolver(), &sources);

    assert_eq!(
        report.registered,
        vec!["com.example.SimpleCodec", "com.example.ParentCodec"]
    );
    assert_eq!(report.warnings.len(), 3);
    assert!(matches!(
        report.warnings[0],
        ManifestWarning::SourceUnreadable { .. }
    ));
    assert_eq!(
        report.warnings[1],
        ManifestWarning::UnknownCodec {
            identifier: "com.example.UnknownCodec".to_string(),
            source_name: file.path().display().to_string(),
        }
    );
    assert!(matches!(
        &report.warnings[2],
        ManifestWarning::Instantiation { identifier, .. } if identifier == "com.example.BrokenCodec"
    ));
    assert_eq!(registry.type_names(), vec!["Parent", "Simple"]);
}

#[test]
fn test_entity_not_matching_model_is_skipped() {
    let resolver = bean2map_model::PropertyResolver::new(bean2map_model::TypeModel::new("empty"));
    let sources = vec![ManifestSource::inline("m", "com.example.SimpleCodec")];
    let (registry, report) = CodecRegistry::initialize(&catalog(), &resolver, &sources);

    assert!(registry.is_empty());
    assert!(report.registered.is_empty());
    assert!(report.warnings[0].to_string().starts_with("[PRELOAD]"));
}

#[test]
fn test_duplicate_manifest_entries_are_harmless() {
    let sources = vec![ManifestSource::inline(
        "dups",
        "com.example.SimpleCodec\ncom.example.SimpleCodec\n",
    )];
    let (registry, report) = CodecRegistry::initialize(&catalog(), &common::resolver(), &sources);
    assert!(report.is_clean());
    assert_eq!(report.registered.len(), 2);
    assert_eq!(registry.len(), 1);
}
