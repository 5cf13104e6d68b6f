use remod_parser::ast::*;
use remod_parser::{parse, print};

fn print_kind(kind: StmtKind) -> String {
    let module = Module {
        path: "t.js".into(),
        source: String::new(),
        stmts: vec![Stmt {
            leading: String::new(),
            raw: None,
            span: None,
            kind,
        }],
        trailing: String::new(),
    };
    print(&module)
}

#[test]
fn default_import() {
    let kind = StmtKind::Import(ImportDecl::default_only("lib", "./lib.js"));
    assert_eq!(print_kind(kind), "import lib from './lib.js';");
}

#[test]
fn namespace_import() {
    let kind = StmtKind::Import(ImportDecl {
        default: None,
        namespace: Some("mod".to_string()),
        named: Vec::new(),
        source: Str::new("./mod.js"),
    });
    assert_eq!(print_kind(kind), "import * as mod from './mod.js';");
}

#[test]
fn named_import_with_alias() {
    let kind = StmtKind::Import(ImportDecl::named_only(
        vec![
            ImportSpecifier::new("a", "a"),
            ImportSpecifier::new("b", "c"),
        ],
        "./mod.js",
    ));
    assert_eq!(print_kind(kind), "import { a, b as c } from './mod.js';");
}

#[test]
fn long_import_list_wraps() {
    let named = (0..12)
        .map(|i| ImportSpecifier::new(format!("veryLongExportedName{i}"), format!("veryLongExportedName{i}")))
        .collect();
    let kind = StmtKind::Import(ImportDecl::named_only(named, "./wide.js"));
    let text = print_kind(kind);
    assert!(text.starts_with("import {\n"));
    assert!(text.contains("    veryLongExportedName0,\n"));
    assert!(text.ends_with("} from './wide.js';"));
}

#[test]
fn export_list_of_two_stays_single_line() {
    let kind = StmtKind::ExportNamed(ExportNamed {
        specifiers: vec![
            ExportSpecifier {
                local: "a".to_string(),
                exported: "a".to_string(),
            },
            ExportSpecifier {
                local: "b_".to_string(),
                exported: "b".to_string(),
            },
        ],
    });
    assert_eq!(print_kind(kind), "export { a, b_ as b };");
}

#[test]
fn export_list_over_two_goes_multiline() {
    let kind = StmtKind::ExportNamed(ExportNamed {
        specifiers: ["a", "b", "c"]
            .iter()
            .map(|n| ExportSpecifier {
                local: n.to_string(),
                exported: n.to_string(),
            })
            .collect(),
    });
    assert_eq!(print_kind(kind), "export {\n    a,\n    b,\n    c,\n};");
}

#[test]
fn string_literals_are_single_quoted() {
    let kind = StmtKind::Import(ImportDecl::default_only("x", "./it's/here.js"));
    assert_eq!(print_kind(kind), "import x from './it\\'s/here.js';");
}

#[test]
fn var_declaration_with_pattern() {
    let kind = StmtKind::Var(VarDecl {
        kind: VarKind::Const,
        declarators: vec![Declarator {
            pat: Pat::Object(vec![
                PatProp {
                    key: "a".to_string(),
                    value: PatPropValue::Shorthand,
                },
                PatProp {
                    key: "b".to_string(),
                    value: PatPropValue::Alias("c".to_string()),
                },
            ]),
            init: Some(Expr::ident("mod")),
        }],
    });
    assert_eq!(print_kind(kind), "const { a, b: c } = mod;");
}

#[test]
fn member_and_call_expressions() {
    let expr = Expr::Call {
        callee: Box::new(Expr::member(Expr::ident("dotenv"), "config")),
        args: vec![],
    };
    assert_eq!(print_kind(StmtKind::Expr(expr)), "dotenv.config();");
}

#[test]
fn edited_statement_reprints_structurally_others_verbatim() {
    let source = "const a = require('./a');\nconst weird   =   require( './w' )  ;\n";
    let mut module = parse(source, "t.js");

    // Simulate a rule editing only the first statement.
    module.stmts[0].kind = StmtKind::Import(ImportDecl::default_only("a", "./a"));
    module.stmts[0].mark_edited();

    let printed = print(&module);
    assert_eq!(
        printed,
        "import a from './a';\nconst weird   =   require( './w' )  ;\n"
    );
}
