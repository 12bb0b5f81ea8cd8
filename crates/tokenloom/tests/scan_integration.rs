//! Scanning, validation, and caching over the snapshot fixture.

use tokenloom::prelude::*;
use tokenloom::store::CACHE_VERSION;
use tokenloom::{AliasIssue, TokenType};

const SNAPSHOT: &str = include_str!("fixtures/snapshot.json");

fn snapshot() -> DocumentSnapshot {
    DocumentSnapshot::from_json(SNAPSHOT).unwrap()
}

// ============================================================================
// scan
// ============================================================================

#[test]
fn scan_categorizes_styles_and_variables() {
    let tokens = scan(&snapshot()).unwrap();

    let blue = tokens.primitives.token(&["color", "blue", "500"]).unwrap();
    assert_eq!(blue.value, TokenValue::from("#3b82f6"));

    let brand = tokens.uncategorized.token(&["color", "brand", "blue"]).unwrap();
    assert_eq!(brand.value, TokenValue::from("#3b82f6"));
    assert_eq!(brand.description.as_deref(), Some("Logo blue"));

    let overlay = tokens.uncategorized.token(&["color", "overlay"]).unwrap();
    assert_eq!(overlay.value, TokenValue::from("rgba(0, 0, 0, 0.600)"));

    let spacing = tokens.primitives.token(&["spacing", "mD"]).unwrap();
    assert_eq!(spacing.token_type, TokenType::Spacing);

    assert_eq!(tokens.token_count(), 12);
}

#[test]
fn scan_keeps_references_with_resolved_values() {
    let tokens = scan(&snapshot()).unwrap();

    let link = tokens.semantic.token(&["color", "text", "link"]).unwrap();
    assert_eq!(link.value, TokenValue::from("{color.accent}"));
    assert_eq!(link.resolved_value, Some(TokenValue::from("#ff0000")));

    let surface = tokens
        .semantic
        .token(&["color", "surface", "default"])
        .unwrap();
    assert_eq!(surface.value, TokenValue::from("{color.white}"));
    assert_eq!(surface.resolved_value, Some(TokenValue::from("#ffffff")));

    let gutter = tokens.semantic.token(&["layout", "gutter"]).unwrap();
    assert_eq!(gutter.value, TokenValue::from("{spacing.mD}"));
    assert_eq!(gutter.resolved_value, Some(TokenValue::Number(16.0)));

    let looped = tokens.semantic.token(&["color", "loop", "a"]).unwrap();
    assert!(looped.is_reference());
    assert_eq!(looped.resolved_value, None);
}

/// True if `reference` (`{a.b.c}`) names a leaf in some category.
fn names_leaf(tokens: &DesignTokens, reference: &TokenValue) -> bool {
    let Some(path) = reference.as_text().and_then(tokenloom::token::reference_target) else {
        return false;
    };
    let segments: Vec<&str> = path.split('.').collect();
    tokenloom::Category::ALL
        .iter()
        .any(|category| tokens.category(*category).token(&segments).is_some())
}

#[test]
fn scan_references_resolve_inside_the_tree() {
    let tokens = scan(&snapshot()).unwrap();
    let aliases = [
        &["color", "text", "link"][..],
        &["color", "surface", "default"][..],
        &["layout", "gutter"][..],
        &["color", "loop", "a"][..],
    ];
    for path in aliases {
        let token = tokens.semantic.token(path).unwrap();
        assert!(names_leaf(&tokens, &token.value), "{:?} -> {}", path, token.value);
    }

    let broken = tokens
        .tokens()
        .into_iter()
        .find(|(_, t)| t.extensions.as_ref().and_then(|e| e.source_id.as_deref()) == Some("V:broken"))
        .unwrap();
    assert!(!names_leaf(&tokens, &broken.1.value));
}

#[test]
fn scan_output_serializes_with_reserved_categories() {
    let tokens = scan(&snapshot()).unwrap();
    let json = serde_json::to_value(&tokens).unwrap();
    for key in ["primitives", "semantic", "components", "uncategorized"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(
        json["semantic"]["color"]["text"]["link"]["$extensions"]["sourceId"],
        "V:link"
    );
}

// ============================================================================
// validate_aliases
// ============================================================================

#[test]
fn validate_reports_cycles_and_broken_links() {
    let source = snapshot();
    let index = VariableIndex::new(&source.variables, &source.collections);
    let issues = validate_aliases(&index);

    assert_eq!(issues.len(), 3);
    assert!(issues.contains(&AliasIssue::CycleDetected {
        path: vec!["Loop/A".into(), "Loop/B".into(), "Loop/A".into()],
    }));
    assert!(issues.contains(&AliasIssue::CycleDetected {
        path: vec!["Loop/B".into(), "Loop/A".into(), "Loop/B".into()],
    }));
    assert!(issues.contains(&AliasIssue::BrokenLink {
        from: "Broken".into(),
        to: "V:gone".into(),
    }));
}

#[test]
fn cross_collection_alias_falls_back_to_first_mode() {
    let source = snapshot();
    let index = VariableIndex::new(&source.variables, &source.collections);
    let surface = index.variable("V:surface").unwrap();
    // Primitives has no "Dark" mode; its first mode is used
    assert_eq!(
        resolve_value(surface, "s:d", &index),
        Some(TokenValue::from("#3b82f6"))
    );
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn collections_index_and_details() {
    let source = snapshot();
    let collections = list_collections(&source).unwrap();
    let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Primitives", "Theme", "Semantic"]);
    assert_eq!(collections[1].variable_ids, vec!["V:accent", "V:link"]);

    let details = build_all_details(&source).unwrap();
    assert_eq!(details.len(), 3);
    assert_eq!(details, build_all_details(&source).unwrap());
}

#[test]
fn missing_collection_is_an_error() {
    let err = build_detail(&snapshot(), "C:missing").unwrap_err();
    assert!(matches!(err, TokenError::CollectionNotFound(_)));
    assert_eq!(err.to_string(), "collection not found: C:missing");
}

// ============================================================================
// Cache
// ============================================================================

#[test]
fn cache_roundtrip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = scan(&snapshot()).unwrap();

    let cache = TokenCache::new(FileStore::new(dir.path()));
    let metadata = cache.save(&tokens, Some("file-abc")).unwrap();
    assert_eq!(metadata.version, CACHE_VERSION);
    assert!(metadata.last_synced > 0);

    let reopened = TokenCache::new(FileStore::new(dir.path()));
    let hit = reopened.load().unwrap().unwrap();
    assert_eq!(hit.tokens, tokens);
    assert_eq!(hit.metadata.external_file_id.as_deref(), Some("file-abc"));

    reopened.clear().unwrap();
    assert!(cache.load().unwrap().is_none());
}
