mod common;

use std::collections::HashMap;
use std::fs;
use std::time::{Duration, SystemTime};

use common::{TestProject, c_header};
use licensor::config::RunConfig;
use licensor::error::{ConfigError, Error};
use licensor::processor::Processor;
use licensor::report::FileAction;
use tempfile::TempDir;

fn processor(project: &TestProject, extensions: &[&str], license: &str, vars: &[(&str, &str)]) -> Processor {
  processor_with(project, extensions, license, vars, |b| b)
}

fn processor_with(
  project: &TestProject,
  extensions: &[&str],
  license: &str,
  vars: &[(&str, &str)],
  customize: impl FnOnce(licensor::config::RunConfigBuilder) -> licensor::config::RunConfigBuilder,
) -> Processor {
  let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  let builder = RunConfig::builder()
    .project_path(project.root())
    .extensions(extensions.iter().copied())
    .license(license)
    .template_vars(vars);
  Processor::new(customize(builder).build().expect("valid config")).expect("processor")
}

#[test]
fn test_insert_skip_remove_scenario() {
  let project = TestProject::new();
  let original = "package a\n\nfunc A() {}\n";
  project.write("a.go", original);

  let summary = processor(&project, &["go"], "MIT {{year}}", &[("year", "2024")])
    .run()
    .expect("first run");
  assert_eq!(summary.summary.inserted, 1);

  let expected = format!("{}\n\n{original}", c_header("MIT 2024"));
  assert_eq!(project.read("a.go"), expected);
  assert!(project.read("a.go").contains("\n MIT 2024\n*/\n\npackage a"));

  let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
  project.set_modified("a.go", stamp);

  let second = processor(&project, &["go"], "MIT {{year}}", &[("year", "2024")])
    .run()
    .expect("second run");
  assert_eq!(second.files_changed(), 0);
  assert_eq!(second.files[0].action, FileAction::UpToDate);
  assert_eq!(project.read("a.go"), expected);
  assert_eq!(project.modified("a.go"), stamp, "an up-to-date file must not be rewritten");

  let removed = processor_with(&project, &["go"], "MIT {{year}}", &[("year", "2024")], |b| b.remove(true))
    .run()
    .expect("remove run");
  assert_eq!(removed.summary.removed, 1);
  assert_eq!(project.read("a.go"), original);
}

#[test]
fn test_changed_license_replaces_header_in_place() {
  let project = TestProject::new();
  project.write("a.go", "package a\n");

  processor(&project, &["go"], "MIT 2023", &[]).run().expect("first run");
  let summary = processor(&project, &["go"], "MIT 2024", &[]).run().expect("second run");

  assert_eq!(summary.summary.replaced, 1);
  assert_eq!(project.read("a.go"), format!("{}\n\npackage a\n", c_header("MIT 2024")));
}

#[test]
fn test_whitespace_only_difference_is_up_to_date() {
  let project = TestProject::new();
  project.write("a.go", "package a\n");
  processor(&project, &["go"], "Copyright ACME\nAll rights reserved", &[]).run().expect("first run");

  let summary = processor(&project, &["go"], "Copyright   ACME\n\nAll rights\treserved\n", &[])
    .run()
    .expect("second run");
  assert_eq!(summary.files_changed(), 0);
}

#[test]
fn test_unconfigured_extensions_are_untouched() {
  let project = TestProject::new();
  project.write("a.go", "package a\n");
  project.write("b.js", "let b = 1;\n");
  project.write("notes.txt", "plain text\n");

  let summary = processor(&project, &["go"], "MIT", &[]).run().expect("run");

  assert_eq!(summary.summary.visited, 1);
  assert_eq!(project.read("b.js"), "let b = 1;\n");
  assert_eq!(project.read("notes.txt"), "plain text\n");
}

#[test]
fn test_extensions_match_case_insensitively() {
  let project = TestProject::new();
  project.write("Main.GO", "package main\n");

  let summary = processor(&project, &["Go"], "MIT", &[]).run().expect("run");

  assert_eq!(summary.summary.inserted, 1);
  assert_eq!(project.read("Main.GO"), format!("{}\n\npackage main\n", c_header("MIT")));
}

#[test]
fn test_each_extension_gets_its_own_comment_style() {
  let project = TestProject::new();
  project.write("index.html", "<p>hi</p>\n");
  project.write("lib.ml", "let x = 1\n");
  project.write("app.rb", "puts 1\n");

  processor(&project, &["html", "ml", "rb"], "MIT", &[]).run().expect("run");

  assert!(project.read("index.html").starts_with("<!-- License generated by licensor"));
  assert!(project.read("index.html").contains("\n MIT\n-->\n\n<p>hi</p>"));
  assert!(project.read("lib.ml").contains("\n MIT\n*)\n\nlet x = 1"));
  assert!(project.read("app.rb").starts_with("=begin License generated"));
  assert!(project.read("app.rb").contains("\n MIT\n=end\n\nputs 1"));
}

#[test]
fn test_preamble_stays_first() {
  let project = TestProject::new();
  let original = "#!/usr/bin/env node\nconsole.log(1);\n";
  project.write("cli.js", original);

  processor(&project, &["js"], "MIT", &[]).run().expect("insert");
  assert_eq!(
    project.read("cli.js"),
    format!("#!/usr/bin/env node\n{}\n\nconsole.log(1);\n", c_header("MIT"))
  );

  processor_with(&project, &["js"], "MIT", &[], |b| b.remove(true)).run().expect("remove");
  assert_eq!(project.read("cli.js"), original);
}

#[test]
fn test_non_utf8_content_is_preserved() {
  let project = TestProject::new();
  let original = vec![b'x', 0xff, 0xfe, b'\n'];
  project.write("blob.c", &original);

  processor(&project, &["c"], "MIT", &[]).run().expect("insert");
  let mut expected = format!("{}\n\n", c_header("MIT")).into_bytes();
  expected.extend_from_slice(&original);
  assert_eq!(project.read_bytes("blob.c"), expected);

  processor_with(&project, &["c"], "MIT", &[], |b| b.remove(true)).run().expect("remove");
  assert_eq!(project.read_bytes("blob.c"), original);
}

#[test]
fn test_remove_without_header_is_noop() {
  let project = TestProject::new();
  project.write("a.go", "package a\n");

  let summary = processor_with(&project, &["go"], "MIT", &[], |b| b.remove(true))
    .run()
    .expect("remove run");

  assert_eq!(summary.files[0].action, FileAction::NoHeader);
  assert_eq!(project.read("a.go"), "package a\n");
}

#[test]
fn test_ignore_patterns_and_builtin_directories() {
  let project = TestProject::new();
  project.write("main.go", "package main\n");
  project.write("vendor/dep/dep.go", "package dep\n");
  project.write("api/api.pb.go", "package api\n");
  project.write(".git/hooks/hook.go", "package hook\n");
  project.write("web/node_modules/x/x.go", "package x\n");

  let summary = processor_with(&project, &["go"], "MIT", &[], |b| {
    b.ignore_patterns(["vendor", "*.pb.go"])
  })
  .run()
  .expect("run");

  assert_eq!(summary.summary.visited, 1);
  assert!(project.read("main.go").contains(common::MARKER));
  assert_eq!(project.read("vendor/dep/dep.go"), "package dep\n");
  assert_eq!(project.read("api/api.pb.go"), "package api\n");
  assert_eq!(project.read(".git/hooks/hook.go"), "package hook\n");
  assert_eq!(project.read("web/node_modules/x/x.go"), "package x\n");
}

#[test]
fn test_ignore_patterns_leave_directories_above_the_project_alone() {
  let temp_dir = TempDir::new().expect("create temp dir");
  let root = temp_dir.path().join("vendor").join("app");
  fs::create_dir_all(root.join("vendor")).expect("create project dir");
  fs::write(root.join("main.go"), "package main\n").expect("write file");
  fs::write(root.join("vendor").join("dep.go"), "package dep\n").expect("write file");

  let config = RunConfig::builder()
    .project_path(root.clone())
    .extensions(["go"])
    .license("MIT")
    .ignore_patterns(["vendor", "app"])
    .build()
    .expect("valid config");
  let summary = Processor::new(config).expect("processor").run().expect("run");

  assert_eq!(summary.summary.visited, 1);
  assert_eq!(summary.summary.inserted, 1);
  assert!(fs::read_to_string(root.join("main.go")).expect("read").contains(common::MARKER));
  assert_eq!(fs::read_to_string(root.join("vendor").join("dep.go")).expect("read"), "package dep\n");
}

#[test]
fn test_files_are_visited_depth_first_in_name_order() {
  let project = TestProject::new();
  for file in ["z.go", "b/b.go", "a.go", "b/a/a.go"] {
    project.write(file, "package x\n");
  }

  let summary = processor(&project, &["go"], "MIT", &[]).run().expect("run");
  let visited: Vec<String> = summary
    .files
    .iter()
    .map(|r| {
      r.path
        .strip_prefix(project.root())
        .expect("under project")
        .to_string_lossy()
        .replace('\\', "/")
    })
    .collect();

  assert_eq!(visited, vec!["a.go", "b/a/a.go", "b/b.go", "z.go"]);
}

#[test]
fn test_malformed_header_aborts_run() {
  let project = TestProject::new();
  project.write("a.go", "package a\n");
  project.write("b.go", format!("/* {}\n unterminated\n", common::MARKER));
  project.write("c.go", "package c\n");

  let err = processor(&project, &["go"], "MIT", &[]).run().expect_err("malformed");

  assert!(matches!(err, Error::MalformedHeader { .. }));
  assert!(project.read("a.go").contains(common::MARKER), "files before the failure are written");
  assert_eq!(project.read("c.go"), "package c\n", "files after the failure are untouched");
}

#[test]
fn test_check_mode_reports_without_writing() {
  let project = TestProject::new();
  project.write("a.go", "package a\n");

  let summary = processor_with(&project, &["go"], "MIT", &[], |b| b.check_only(true))
    .run()
    .expect("run");

  assert_eq!(summary.summary.inserted, 1);
  assert_eq!(project.read("a.go"), "package a\n");
}

#[test]
fn test_license_containing_postfix_is_rejected() {
  let project = TestProject::new();
  let config = RunConfig::builder()
    .project_path(project.root())
    .extensions(["go", "html"])
    .license("ends here -->")
    .build()
    .expect("valid config");

  let err = Processor::new(config).err().expect("postfix in body");
  assert!(matches!(
    err,
    Error::Config(ConfigError::LicenseContainsPostfix { ref extension, .. }) if extension == "html"
  ));
}

#[test]
fn test_missing_project_is_rejected() {
  let project = TestProject::new();
  let err = RunConfig::builder()
    .project_path(project.root().join("missing"))
    .extensions(["go"])
    .license("MIT")
    .build()
    .expect_err("missing project");

  assert!(matches!(err, Error::Config(ConfigError::ProjectNotFound(_))));
}
