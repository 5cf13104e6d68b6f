//! Statement-level tree for one unit under migration.
//!
//! The tree is deliberately bounded: statements the rewrite rules care about
//! (variable declarations, imports, exports, a few expression-statement
//! shapes) are parsed structurally, everything else is carried as verbatim
//! `Raw` text. Each statement also keeps its original source slice (`raw`)
//! and the exact trivia that preceded it (`leading`); an untouched statement
//! reprints byte-for-byte, and a rule that edits a node clears `raw` so the
//! printer rebuilds that statement from structure.

use std::path::PathBuf;

pub type Span = (usize, usize);

/// One file's tree. Owned by the pipeline; each rule consumes and returns it.
#[derive(Debug, Clone)]
pub struct Module {
    pub path: PathBuf,
    /// Original source text, kept for line lookups and verbatim passthrough.
    pub source: String,
    pub stmts: Vec<Stmt>,
    /// Trivia after the last statement (trailing comments, final newline).
    pub trailing: String,
}

#[derive(Debug, Clone)]
pub struct Stmt {
    /// Exact text (whitespace, comments, blank lines) before the statement.
    pub leading: String,
    /// Original source slice; `None` once a rule has edited the node.
    pub raw: Option<String>,
    pub span: Option<Span>,
    pub kind: StmtKind,
}

impl Stmt {
    /// A rule-synthesized statement, separated from its predecessor by one
    /// line break.
    pub fn synthetic(kind: StmtKind) -> Stmt {
        Stmt {
            leading: "\n".to_string(),
            raw: None,
            span: None,
            kind,
        }
    }

    pub fn with_leading(kind: StmtKind, leading: impl Into<String>) -> Stmt {
        Stmt {
            leading: leading.into(),
            raw: None,
            span: None,
            kind,
        }
    }

    /// Drop the verbatim slice after an in-place edit so the printer rebuilds
    /// this statement from its structure.
    pub fn mark_edited(&mut self) {
        self.raw = None;
    }

    pub fn import(&self) -> Option<&ImportDecl> {
        match &self.kind {
            StmtKind::Import(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn import_mut(&mut self) -> Option<&mut ImportDecl> {
        match &mut self.kind {
            StmtKind::Import(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn var(&self) -> Option<&VarDecl> {
        match &self.kind {
            StmtKind::Var(decl) => Some(decl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Var(VarDecl),
    Import(ImportDecl),
    ExportNamed(ExportNamed),
    ExportDefault(ExportDefault),
    /// Expression statement with a recognized expression shape.
    Expr(Expr),
    /// Function declaration; only the name is modeled, the text is verbatim.
    Function(FunctionDeclStmt),
    /// Class declaration; only the name is modeled, the text is verbatim.
    Class(ClassDeclStmt),
    /// Anything the parser does not model.
    Raw(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VarKind {
    Const,
    Let,
    Var,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Const => "const",
            VarKind::Let => "let",
            VarKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone)]
pub struct Declarator {
    pub pat: Pat,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone)]
pub enum Pat {
    Ident(String),
    Object(Vec<PatProp>),
}

#[derive(Debug, Clone)]
pub struct PatProp {
    pub key: String,
    pub value: PatPropValue,
}

#[derive(Debug, Clone)]
pub enum PatPropValue {
    /// `{ a }`
    Shorthand,
    /// `{ a: b }`
    Alias(String),
    /// `{ a: { … } }`
    Nested(Vec<PatProp>),
    /// `{ ...a }`
    Rest,
}

impl PatProp {
    /// Name this property binds at the pattern's own level, if it binds one.
    pub fn bound_name(&self) -> Option<&str> {
        match &self.value {
            PatPropValue::Shorthand | PatPropValue::Rest => Some(&self.key),
            PatPropValue::Alias(local) => Some(local),
            PatPropValue::Nested(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub named: Vec<ImportSpecifier>,
    pub source: Str,
}

impl ImportDecl {
    pub fn default_only(local: impl Into<String>, source: impl Into<String>) -> ImportDecl {
        ImportDecl {
            default: Some(local.into()),
            namespace: None,
            named: Vec::new(),
            source: Str::new(source),
        }
    }

    pub fn named_only(named: Vec<ImportSpecifier>, source: impl Into<String>) -> ImportDecl {
        ImportDecl {
            default: None,
            namespace: None,
            named,
            source: Str::new(source),
        }
    }

    /// `import 'x';`
    pub fn is_side_effect_only(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_empty()
    }

    /// Local names this declaration binds.
    pub fn locals(&self) -> impl Iterator<Item = &str> {
        self.default
            .iter()
            .chain(self.namespace.iter())
            .map(String::as_str)
            .chain(self.named.iter().map(|s| s.local.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
}

impl ImportSpecifier {
    pub fn new(imported: impl Into<String>, local: impl Into<String>) -> ImportSpecifier {
        ImportSpecifier {
            imported: imported.into(),
            local: local.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportNamed {
    pub specifiers: Vec<ExportSpecifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifier {
    pub local: String,
    pub exported: String,
}

#[derive(Debug, Clone)]
pub struct ExportDefault {
    pub value: Expr,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclStmt {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ClassDeclStmt {
    pub name: String,
    pub text: String,
}

/// String literal; holds the cooked value, printed single-quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Str {
    pub value: String,
}

impl Str {
    pub fn new(value: impl Into<String>) -> Str {
        Str {
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Ident(String),
    Str(Str),
    Num(String),
    /// Dot member access `obj.prop`.
    Member { obj: Box<Expr>, prop: String },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Object(Vec<ObjProp>),
    Function(FunctionExpr),
    Assign { target: Box<Expr>, value: Box<Expr> },
    /// Verbatim expression text the parser does not model.
    Raw(String),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn member(obj: Expr, prop: impl Into<String>) -> Expr {
        Expr::Member {
            obj: Box::new(obj),
            prop: prop.into(),
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_str_lit(&self) -> Option<&Str> {
        match self {
            Expr::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ObjProp {
    /// `{ a }`
    Shorthand(String),
    /// `{ a: expr }`
    KeyValue { key: String, value: Expr },
    /// `{ a() {} }`, `get a() {}` and friends; kept verbatim.
    Method(String),
    /// `{ ...expr }`, kept verbatim including the dots.
    Spread(String),
    /// `{ [expr]: value }`, kept verbatim.
    Computed(String),
    /// String/number keys and anything else, kept verbatim.
    Other(String),
}

#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub name: Option<String>,
    pub is_async: bool,
    pub is_generator: bool,
    /// Parameter list text, without the surrounding parentheses.
    pub params: String,
    /// Body text including the surrounding braces.
    pub body: String,
}
