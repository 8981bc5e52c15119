//! End-to-end runs of the orchestrator over temporary inputs.
//!
//! Modules come from a stub loader so the tests control every type the synthesizers see;
//! artifacts are written to `tempfile` directories and read back.

use std::{
    fs,
    path::{Path, PathBuf},
};

use dotscribe::{
    decompiler::{Decompiler, SkeletonDecompiler},
    knowledge::TRUNCATION_WARNING,
    metadata::{
        token::Token,
        typesystem::{
            CilModule, CilType, Field, FieldModifiers, MemberAccessFlags, Method,
            MethodModifiers, MethodVtableFlags, TypeKind,
        },
    },
    orchestrator::{LogReporter, ModuleLoader, Orchestrator, PeLoader, RunOutcome},
    Config, Error, Result,
};

fn class(namespace: &str, name: &str, row: u32) -> CilType {
    let full_name = if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    };

    let ctor_flags = 0x1886;
    CilType {
        token: Token::from_parts(0x02, row),
        namespace: namespace.to_string(),
        name: name.to_string(),
        reflection_name: full_name.clone(),
        full_name,
        enclosing: None,
        flags: 0x0010_0001,
        kind: TypeKind::Class,
        base_type: Some("System.Object".to_string()),
        interfaces: Vec::new(),
        generic_params: Vec::new(),
        fields: vec![Field {
            token: Token::from_parts(0x04, row),
            name: "Count".to_string(),
            access: MemberAccessFlags::from_member_flags(0x0006),
            modifiers: FieldModifiers::from_field_flags(0x0006),
            type_name: "System.Int32".to_string(),
        }],
        properties: Vec::new(),
        events: Vec::new(),
        methods: vec![Method {
            token: Token::from_parts(0x06, row),
            name: ".ctor".to_string(),
            access: MemberAccessFlags::from_member_flags(ctor_flags),
            vtable: MethodVtableFlags::from_method_flags(ctor_flags),
            modifiers: MethodModifiers::from_method_flags(ctor_flags),
            generic_params: Vec::new(),
            return_type: "System.Void".to_string(),
            parameters: Vec::new(),
        }],
    }
}

/// Serves the same module for every path.
struct StubLoader(CilModule);

impl ModuleLoader for StubLoader {
    fn load(&self, _path: &Path) -> Result<CilModule> {
        Ok(self.0.clone())
    }
}

/// Skeleton output, except for types named in `failing`.
struct FlakyDecompiler {
    failing: &'static str,
}

impl Decompiler for FlakyDecompiler {
    fn name(&self) -> &str {
        "flaky"
    }

    fn decompile(&self, module: &CilModule, ty: &CilType) -> Result<String> {
        if ty.name == self.failing {
            return Err(Error::Decompile {
                type_name: ty.full_name.clone(),
                message: "Sequence contains no elements".to_string(),
            });
        }
        SkeletonDecompiler.decompile(module, ty)
    }
}

fn game_module() -> CilModule {
    CilModule {
        name: "Assembly-CSharp.dll".to_string(),
        path: None,
        types: vec![
            class("Assembly-CSharp", "Foo", 1),
            class("UnityEngine", "Bar", 2),
            class("InnerNet", "Client", 3),
            class("", "GameManager", 4),
        ],
    }
}

fn input(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"MZ").unwrap();
    path
}

fn run(config: &Config, decompiler: &dyn Decompiler, inputs: &[PathBuf]) -> RunOutcome {
    let loader = StubLoader(game_module());
    let orchestrator = Orchestrator::new(config, &loader, decompiler)
        .with_clock(|| "2025-06-01 12:00:00".to_string());
    orchestrator.run(inputs, &mut LogReporter)
}

fn artifacts(outcome: &RunOutcome) -> (String, String) {
    let summary = &outcome.summaries[0];
    (
        fs::read_to_string(&summary.index_path).unwrap(),
        fs::read_to_string(&summary.knowledge_base_path).unwrap(),
    )
}

#[test]
fn excluded_namespaces_never_appear() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let outcome = run(&config, &SkeletonDecompiler, &[input(dir.path(), "Game.dll")]);

    assert!(outcome.is_success());
    let (index, kb) = artifacts(&outcome);

    assert!(index.contains("\n// Foo\n"));
    assert!(kb.contains("public class Foo\n"));
    assert!(!index.contains("Bar"));
    assert!(!kb.contains("Bar"));

    assert!(index.contains("namespace Global\n{\n    class GameManager\n"));
    assert!(index.contains("        // Fields\n        - public int Count\n"));
    assert!(index.contains("        // Constructors\n        - public void .ctor()\n"));

    let summary = &outcome.summaries[0];
    assert_eq!(summary.index_namespaces, 3);
    assert_eq!(summary.index_types, 3);
    assert_eq!(summary.index_members, 6);
    assert_eq!(summary.kb_types_considered, 3);
    assert_eq!(summary.kb_types_emitted, 3);
    assert!(!summary.truncated);
}

#[test]
fn runs_are_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let config = Config {
        synthesis: dotscribe::config::SynthesisConfig {
            jobs: 3,
            ..Default::default()
        },
        ..Config::default()
    };

    let a = run(&config, &SkeletonDecompiler, &[input(first.path(), "Game.dll")]);
    let b = run(&Config::default(), &SkeletonDecompiler, &[input(second.path(), "Game.dll")]);

    assert_eq!(artifacts(&a), artifacts(&b));
}

#[test]
fn failing_type_is_a_single_comment() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();

    let clean = run(&config, &SkeletonDecompiler, &[input(dir.path(), "Clean.dll")]);
    let flaky = run(
        &config,
        &FlakyDecompiler { failing: "Client" },
        &[input(dir.path(), "Flaky.dll")],
    );

    let (clean_index, _) = artifacts(&clean);
    let (flaky_index, kb) = artifacts(&flaky);

    let failures: Vec<&str> = kb
        .lines()
        .filter(|line| line.starts_with("// Failed to decompile type:"))
        .collect();
    assert_eq!(
        failures,
        ["// Failed to decompile type: InnerNet.Client -> Sequence contains no elements"]
    );
    assert_eq!(clean_index, flaky_index);

    let summary = &flaky.summaries[0];
    assert_eq!(summary.kb_types_emitted, 2);
    assert_eq!(summary.kb_failures, 1);
}

#[test]
fn ceiling_truncates_between_types() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.synthesis.token_approx_ceiling = 60;

    let outcome = run(&config, &SkeletonDecompiler, &[input(dir.path(), "Game.dll")]);
    let (_, kb) = artifacts(&outcome);
    let summary = &outcome.summaries[0];

    assert!(summary.truncated);
    assert!(summary.kb_types_emitted < summary.kb_types_considered);
    assert!(kb.ends_with(&format!("{TRUNCATION_WARNING}\n")));
    // Full-name order: Assembly-CSharp.Foo, GameManager, InnerNet.Client
    assert!(kb.contains("public class Foo\n"));
    assert!(!kb.contains("class Client"));
}

#[test]
fn bad_inputs_do_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.output.directory = Some(dir.path().join("out"));

    let inputs = [
        dir.path().join("Missing.dll"),
        input(dir.path(), "notes.txt"),
        input(dir.path(), "Game.DLL"),
    ];
    let outcome = run(&config, &SkeletonDecompiler, &inputs);

    assert!(!outcome.is_success());
    assert_eq!(outcome.failures.len(), 2);
    assert!(outcome
        .failures
        .iter()
        .all(|(_, e)| matches!(e, Error::InvalidInput { .. })));

    let summary = &outcome.summaries[0];
    assert_eq!(
        summary.index_path,
        dir.path().join("out/Game-knowledge-base-index.txt")
    );
    assert!(summary.knowledge_base_path.is_file());
}

#[test]
fn unreadable_image_is_a_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = input(dir.path(), "Broken.dll");
    let config = Config::default();

    let outcome = Orchestrator::new(&config, &PeLoader, &SkeletonDecompiler)
        .run(&[path.clone()], &mut LogReporter);

    assert_eq!(outcome.failures.len(), 1);
    match &outcome.failures[0] {
        (failed, Error::MetadataLoad { path: reported, .. }) => {
            assert_eq!(failed, &path);
            assert_eq!(reported, &path);
        }
        other => panic!("unexpected failure: {other:?}"),
    }
    assert!(!dir.path().join("Broken-knowledge-base-index.txt").exists());
}
