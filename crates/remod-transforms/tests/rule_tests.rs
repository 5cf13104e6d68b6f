//! Per-rule transform scenarios, each run with only the rule under test.

use remod_common::{Host, MemoryHost, Severity};
use remod_transforms::{transform, Config, Outcome};
use std::path::Path;

fn run_rule(rule: &str, source: &str, host: &dyn Host) -> Outcome {
    let config = Config {
        rules: vec![rule.to_string()],
        halt_on_abort: false,
    };
    transform(source, Path::new("/p/unit.js"), &config, host)
}

fn run_rule_text(rule: &str, source: &str, host: &dyn Host) -> String {
    run_rule(rule, source, host).text
}

fn empty_host() -> MemoryHost {
    MemoryHost::new()
}

// ----------------------------------------------------- side-effect require

#[test]
fn side_effect_require_becomes_import_and_call() {
    let host = empty_host();
    let out = run_rule_text(
        "side-effect-require-to-import",
        "require('dotenv').config();\n",
        &host,
    );
    assert_eq!(out, "import dotenv from 'dotenv';\ndotenv.config();\n");
}

#[test]
fn side_effect_require_reuses_existing_default_import() {
    let host = empty_host();
    let out = run_rule_text(
        "side-effect-require-to-import",
        "import env from 'dotenv';\nrequire('dotenv').config();\n",
        &host,
    );
    assert_eq!(out, "import env from 'dotenv';\nenv.config();\n");
}

#[test]
fn side_effect_import_lands_before_existing_imports() {
    let host = empty_host();
    let out = run_rule_text(
        "side-effect-require-to-import",
        "import fs from 'fs';\nrequire('dotenv').config();\n",
        &host,
    );
    assert_eq!(
        out,
        "import dotenv from 'dotenv';\nimport fs from 'fs';\ndotenv.config();\n"
    );
}

#[test]
fn side_effect_require_keeps_arguments() {
    let host = empty_host();
    let out = run_rule_text(
        "side-effect-require-to-import",
        "require('debug').enable('app:*');\n",
        &host,
    );
    assert_eq!(out, "import debug from 'debug';\ndebug.enable('app:*');\n");
}

// -------------------------------------------------- nested pattern flatten

#[test]
fn nested_pattern_flattens_to_member_reads() {
    let host = empty_host();
    let out = run_rule_text(
        "flatten-nested-require-pattern",
        "const { Models: { User } } = require('../models');\n",
        &host,
    );
    assert_eq!(
        out,
        "const { Models } = require('../models');\nconst User = Models.User;\n"
    );
}

#[test]
fn nested_pattern_keeps_kind_and_flat_siblings() {
    let host = empty_host();
    let out = run_rule_text(
        "flatten-nested-require-pattern",
        "let { db, Models: { User, Role: R } } = require('../models');\n",
        &host,
    );
    assert_eq!(
        out,
        "let { db, Models } = require('../models');\nconst User = Models.User;\nconst R = Models.Role;\n"
    );
}

#[test]
fn nested_pattern_preserves_leading_comment() {
    let host = empty_host();
    let out = run_rule_text(
        "flatten-nested-require-pattern",
        "// models\nconst { Models: { User } } = require('../models');\n",
        &host,
    );
    assert!(out.starts_with("// models\nconst { Models } = require('../models');"));
}

#[test]
fn single_level_pattern_is_untouched() {
    let host = empty_host();
    let source = "const { a, b } = require('./m');\n";
    let out = run_rule(
        "flatten-nested-require-pattern",
        source,
        &host,
    );
    assert!(!out.changed);
    assert_eq!(out.text, source);
}

// ------------------------------------------------- module.exports to exports

#[test]
fn exports_object_with_collision_and_duplicates() {
    let host = empty_host();
    let out = run_rule_text(
        "module-exports-to-exports",
        "const a = 1;\nmodule.exports = { a, b: compute(), a };\n",
        &host,
    );
    assert_eq!(
        out,
        "const a = 1;\nconst b = compute();\nexport {\n    a,\n    b,\n    a,\n};\n"
    );
}

#[test]
fn exports_object_hoisted_name_collision_appends_suffix() {
    let host = empty_host();
    let out = run_rule_text(
        "module-exports-to-exports",
        "const b = 1;\nmodule.exports = { b: compute() };\n",
        &host,
    );
    assert_eq!(
        out,
        "const b = 1;\nconst b_ = compute();\nexport { b_ as b };\n"
    );
}

#[test]
fn exports_key_equal_value_reexports_directly() {
    let host = empty_host();
    let out = run_rule_text(
        "module-exports-to-exports",
        "const a = 1;\nmodule.exports = { a: a, b: 2 };\n",
        &host,
    );
    assert_eq!(out, "const a = 1;\nconst b = 2;\nexport { a, b };\n");
}

#[test]
fn exports_non_object_becomes_default_export() {
    let host = empty_host();
    let out = run_rule_text(
        "module-exports-to-exports",
        "module.exports = createApp();\n",
        &host,
    );
    assert_eq!(out, "export default createApp();\n");
}

#[test]
fn exports_spread_and_computed_are_skipped() {
    let host = empty_host();
    let outcome = run_rule(
        "module-exports-to-exports",
        "module.exports = { a, ...rest, [key]: 1 };\n",
        &host,
    );
    assert_eq!(outcome.text, "export { a };\n");
    assert!(outcome
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Log)
        .count() >= 2);
}

#[test]
fn multiple_exports_assignments_abort_the_unit() {
    let host = empty_host();
    let source = "module.exports = { a };\nmodule.exports = { b };\n";
    let outcome = run_rule("module-exports-to-exports", source, &host);
    assert_eq!(outcome.text, source, "abort must preserve the source");
    assert!(!outcome.changed);
    assert_eq!(outcome.aborted.len(), 1);
    assert!(outcome.diagnostics.iter().any(|d| d.severity == Severity::Error));
}

// ------------------------------------------------------- require to import

#[test]
fn plain_require_becomes_default_import() {
    let host = empty_host();
    let out = run_rule_text("require-to-import", "const Lib = require('lib');\n", &host);
    assert_eq!(out, "import Lib from 'lib';\n");
}

#[test]
fn destructured_require_becomes_named_import() {
    let host = empty_host();
    let out = run_rule_text(
        "require-to-import",
        "const { a, b: c } = require('./m');\n",
        &host,
    );
    assert_eq!(out, "import { a, b as c } from './m';\n");
}

#[test]
fn property_require_becomes_named_import_with_alias() {
    let host = empty_host();
    let out = run_rule_text(
        "require-to-import",
        "const conf = require('./app').config;\n",
        &host,
    );
    assert_eq!(out, "import { config as conf } from './app';\n");

    let out = run_rule_text(
        "require-to-import",
        "const config = require('./app').config;\n",
        &host,
    );
    assert_eq!(out, "import { config } from './app';\n");
}

#[test]
fn mixed_declaration_splits_with_residual() {
    let host = empty_host();
    let outcome = run_rule(
        "require-to-import",
        "let x = require('./x'), y = 5;\n",
        &host,
    );
    assert_eq!(outcome.text, "import x from './x';\nlet y = 5;\n");
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning));
}

#[test]
fn require_with_two_arguments_aborts_unit() {
    let host = empty_host();
    let source = "const ok = require('./ok');\nconst bad = require('./bad', extra);\n";
    let outcome = run_rule("require-to-import", source, &host);
    assert_eq!(outcome.text, source, "abort must preserve the source");
    assert!(!outcome.changed);
    assert_eq!(outcome.aborted.len(), 1);
}

#[test]
fn require_with_non_literal_specifier_aborts_unit() {
    let host = empty_host();
    let source = "const lib = require(name);\n";
    let outcome = run_rule("require-to-import", source, &host);
    assert_eq!(outcome.text, source);
    assert!(outcome.diagnostics.iter().any(|d| d.severity == Severity::Error));
}

#[test]
fn destructuring_a_require_property_is_left_alone() {
    let host = empty_host();
    let source = "const { c } = require('./m').a;\n";
    let outcome = run_rule("require-to-import", source, &host);
    assert_eq!(outcome.text, source);
    assert!(!outcome.changed);
    assert!(outcome.diagnostics.iter().any(|d| d.severity == Severity::Log));
}

#[test]
fn leading_comment_moves_to_first_import() {
    let host = empty_host();
    let out = run_rule_text(
        "require-to-import",
        "// the library\nconst lib = require('./lib');\n",
        &host,
    );
    assert_eq!(out, "// the library\nimport lib from './lib';\n");
}

// ------------------------------------------------------ import path suffix

#[test]
fn bare_relative_path_gains_js_suffix() {
    let mut host = MemoryHost::new();
    host.insert("/p/lib.js", "export default 1;");
    let out = run_rule_text("add-import-path-suffix", "import lib from './lib';\n", &host);
    assert_eq!(out, "import lib from './lib.js';\n");
}

#[test]
fn directory_import_gains_index_suffix() {
    let mut host = MemoryHost::new();
    host.insert("/p/models/index.js", "export const User = 1;");
    let out = run_rule_text(
        "add-import-path-suffix",
        "import models from './models';\n",
        &host,
    );
    assert_eq!(out, "import models from './models/index.js';\n");
}

#[test]
fn missing_target_is_never_suffixed() {
    let host = empty_host();
    let source = "import lib from './nowhere';\n";
    let out = run_rule("add-import-path-suffix", source, &host);
    assert!(!out.changed);
    assert_eq!(out.text, source);
}

#[test]
fn bare_and_suffixed_specifiers_are_skipped() {
    let mut host = MemoryHost::new();
    host.insert("/p/lib.js", "export default 1;");
    for source in [
        "import fs from 'fs';\n",
        "import lib from './lib.js';\n",
    ] {
        let out = run_rule("add-import-path-suffix", source, &host);
        assert!(!out.changed, "{source:?} should not change");
    }
}

// ------------------------------------------------ merge destructured default

#[test]
fn named_import_of_defaultless_module_merges() {
    let mut host = MemoryHost::new();
    host.insert("/p/mod.js", "export const a = 1;\nexport const b = 2;");
    let out = run_rule_text(
        "merge-destructured-default",
        "import { a, b } from './mod.js';\n",
        &host,
    );
    assert_eq!(out, "import mod from './mod.js';\nconst { a, b } = mod;\n");
}

#[test]
fn merge_reuses_existing_default_import_and_absorbs_destructures() {
    let mut host = MemoryHost::new();
    host.insert("/p/mod.js", "export const a = 1;");
    let out = run_rule_text(
        "merge-destructured-default",
        "import mod from './mod.js';\nimport { a } from './mod.js';\nconst { b } = mod;\n",
        &host,
    );
    assert_eq!(out, "import mod from './mod.js';\nconst { a, b } = mod;\n");
}

#[test]
fn merge_generates_collision_free_local() {
    let mut host = MemoryHost::new();
    host.insert("/p/mod.js", "export const a = 1;");
    let out = run_rule_text(
        "merge-destructured-default",
        "const mod = 1;\nimport { a } from './mod.js';\n",
        &host,
    );
    assert_eq!(
        out,
        "const mod = 1;\nimport mod1 from './mod.js';\nconst { a } = mod1;\n"
    );
}

#[test]
fn merge_skips_modules_with_default_export() {
    let mut host = MemoryHost::new();
    host.insert("/p/mod.js", "export default 1;\nexport const a = 2;");
    let source = "import { a } from './mod.js';\n";
    let out = run_rule("merge-destructured-default", source, &host);
    assert!(!out.changed);
}

#[test]
fn merge_skips_bare_specifiers() {
    let host = empty_host();
    let source = "import { readFile } from 'fs';\n";
    let out = run_rule("merge-destructured-default", source, &host);
    assert!(!out.changed, "bare specifiers must never be merged");
}

#[test]
fn merge_preserves_aliases() {
    let mut host = MemoryHost::new();
    host.insert("/p/util.js", "export const helper = 1;");
    let out = run_rule_text(
        "merge-destructured-default",
        "import { helper as h } from './util.js';\n",
        &host,
    );
    assert_eq!(out, "import util from './util.js';\nconst { helper: h } = util;\n");
}

// --------------------------------------------- namespace import if no default

#[test]
fn default_import_of_defaultless_module_upgrades() {
    let mut host = MemoryHost::new();
    host.insert("/p/mod.js", "export const a = 1;");
    let out = run_rule_text(
        "namespace-import-if-no-default",
        "import mod from './mod.js';\n",
        &host,
    );
    assert_eq!(out, "import * as mod from './mod.js';\n");
}

#[test]
fn mixed_import_moves_named_bindings_to_destructure() {
    let mut host = MemoryHost::new();
    host.insert("/p/mod.js", "export const a = 1;\nexport const b = 2;");
    let out = run_rule_text(
        "namespace-import-if-no-default",
        "import mod, { a, b as c } from './mod.js';\n",
        &host,
    );
    assert_eq!(
        out,
        "import * as mod from './mod.js';\nconst { a, b: c } = mod;\n"
    );
}

#[test]
fn modules_with_default_are_left_alone() {
    let mut host = MemoryHost::new();
    host.insert("/p/mod.js", "export default 1;");
    let source = "import mod from './mod.js';\n";
    let out = run_rule("namespace-import-if-no-default", source, &host);
    assert!(!out.changed);
}

#[test]
fn unsuffixed_and_unresolved_specifiers_are_left_alone() {
    let host = empty_host();
    for source in [
        "import mod from './mod';\n",
        "import mod from './gone.js';\n",
        "import mod from 'pkg';\n",
    ] {
        let out = run_rule("namespace-import-if-no-default", source, &host);
        assert!(!out.changed, "{source:?} should not change");
    }
}

// --------------------------------------------------- unwrap exports access

#[test]
fn exports_member_access_unwraps_everywhere() {
    let host = empty_host();
    let out = run_rule_text(
        "unwrap-module-exports-access",
        "module.exports.foo();\nfunction g() { return module.exports.bar; }\n",
        &host,
    );
    assert_eq!(out, "foo();\nfunction g() { return bar; }\n");
}

#[test]
fn unwrap_leaves_plain_exports_assignment_alone() {
    let host = empty_host();
    let source = "module.exports = { a };\n";
    let out = run_rule("unwrap-module-exports-access", source, &host);
    assert!(!out.changed);
    assert_eq!(out.text, source);
}

#[test]
fn unwrap_ignores_strings_and_comments() {
    let host = empty_host();
    let source = "// module.exports.note\nconst s = 'module.exports.note';\n";
    let out = run_rule("unwrap-module-exports-access", source, &host);
    assert!(!out.changed);
    assert_eq!(out.text, source);
}

#[test]
fn unwrap_requires_module_root() {
    let host = empty_host();
    let source = "function f() { return app.module.exports.foo; }\n";
    let out = run_rule("unwrap-module-exports-access", source, &host);
    assert!(!out.changed);
}

// ------------------------------------------------ anonymous function naming

#[test]
fn anonymous_function_var_becomes_declaration() {
    let host = empty_host();
    let out = run_rule_text(
        "name-anonymous-function-vars",
        "const go = function(a, b) { return a + b; };\n",
        &host,
    );
    assert_eq!(out, "function go(a, b) { return a + b; }\n");
}

#[test]
fn async_and_generator_flags_survive() {
    let host = empty_host();
    let out = run_rule_text(
        "name-anonymous-function-vars",
        "let pump = async function*(src) { yield src; };\n",
        &host,
    );
    assert_eq!(out, "async function* pump(src) { yield src; }\n");
}

#[test]
fn named_and_arrow_initializers_are_left_alone() {
    let host = empty_host();
    for source in [
        "const go = function go() {};\n",
        "const go = () => 1;\n",
        "var go = function() {};\n",
    ] {
        let out = run_rule("name-anonymous-function-vars", source, &host);
        assert!(!out.changed, "{source:?} should not change");
    }
}

// -------------------------------------------------- dirname and filename

#[test]
fn dirname_and_filename_become_import_meta() {
    let host = empty_host();
    let out = run_rule_text(
        "replace-dirname-filename",
        "const here = path.join(__dirname, 'assets');\nfunction f() { return __filename; }\n",
        &host,
    );
    assert_eq!(
        out,
        "const here = path.join(import.meta.dirname, 'assets');\nfunction f() { return import.meta.filename; }\n"
    );
}

#[test]
fn dirname_in_strings_is_untouched() {
    let host = empty_host();
    let source = "const s = '__dirname';\n";
    let out = run_rule("replace-dirname-filename", source, &host);
    assert!(!out.changed);
}
