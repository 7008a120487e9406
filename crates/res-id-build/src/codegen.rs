//! Namespace tree builder — compiles the sorted table into nested modules.
//!
//! One pass over the entries, with an explicit stack of open scope frames.
//! Per entry: close every scope the path prefix has retreated past, open a
//! scope per new directory segment, emit the leaf constant, and register the
//! id into every open frame (ancestors need the union so their own
//! `enumerate()` covers all descendants). Scopes close strictly LIFO, so the
//! emitted module blocks are always balanced and each scope's `enumerate()`
//! lands exactly once, just before its closing brace.

use std::collections::HashMap;

use res_id::{RawId, Run};

use crate::compress::compress_runs;
use crate::table::ResourceTable;

/// Options steering code emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOptions {
    /// Name of the outer generated module.
    pub module_name: String,
    /// Crate the emitted code resolves `IdRange`/`MultiRange`/`Run` from,
    /// as it appears in a Rust path (underscores, not hyphens).
    pub id_crate: String,
    /// Full path of the identifier type for constants. `None` uses
    /// `::{id_crate}::ResId`. A custom type must provide
    /// `const fn from_raw(u32)`.
    pub type_name: Option<String>,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            module_name: "resources".to_string(),
            id_crate: "res_id".to_string(),
            type_name: None,
        }
    }
}

impl GenOptions {
    /// The identifier type path emitted for constants.
    pub fn id_type(&self) -> String {
        self.type_name
            .clone()
            .unwrap_or_else(|| format!("::{}::ResId", self.id_crate))
    }

    fn support(&self, item: &str) -> String {
        format!("::{}::{}", self.id_crate, item)
    }
}

/// Errors the emission pass can detect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// Two distinct path segments sanitize to the same identifier inside
    /// one scope. Emitting would silently merge or shadow them, so the
    /// pass fails instead.
    IdentCollision {
        scope: String,
        ident: String,
        first: String,
        second: String,
    },
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentCollision {
                scope,
                ident,
                first,
                second,
            } => write!(
                f,
                "identifier collision in scope '{}': segments '{}' and '{}' both sanitize to '{}'. \
                 Rename one of them.",
                scope, first, second, ident
            ),
        }
    }
}

impl std::error::Error for CodegenError {}

/// Generate the full source text for `table`.
///
/// Deterministic: the same table always produces byte-identical output.
pub fn generate_code(options: &GenOptions, table: &ResourceTable) -> Result<String, CodegenError> {
    let mut w = CodeWriter::new();
    w.add_line("// @generated by res-id-build. Do not edit by hand.");
    w.add_line("#[rustfmt::skip]");
    w.add_line("#[allow(dead_code)]");
    w.add_line(format!("pub mod {} {{", options.module_name));
    w.indent();

    let ty = options.id_type();
    // Implicit root scope; frames above it mirror open directory segments.
    let mut stack: Vec<ScopeFrame> = vec![ScopeFrame::new(String::new())];

    for entry in table.entries() {
        let segments: Vec<&str> = entry.segments().collect();
        let (leaf, dir) = segments
            .split_last()
            .expect("table validation rejects empty paths");

        // Retreat: close scopes until the open prefix is a prefix of the
        // entry's directory.
        let mut common = 0;
        while common < stack.len() - 1
            && common < dir.len()
            && stack[common + 1].segment == dir[common]
        {
            common += 1;
        }
        while stack.len() - 1 > common {
            close_scope(&mut stack, &mut w, options);
        }

        // Descend: one new scope per unconsumed directory segment.
        for segment in &dir[common..] {
            open_scope(&mut stack, &mut w, options, segment)?;
        }

        // Leaf constant.
        let name = sanitize_const(leaf);
        let scope = scope_path(&stack, options);
        let frame = stack.last_mut().expect("root frame always open");
        if let Some(first) = frame.consts.insert(name.clone(), leaf.to_string()) {
            return Err(CodegenError::IdentCollision {
                scope,
                ident: name,
                first,
                second: leaf.to_string(),
            });
        }
        w.add_line(format!(
            "pub const {}: {} = {}::from_raw({});",
            name, ty, ty, entry.id
        ));

        // The id belongs to every open scope, root included.
        for frame in &mut stack {
            frame.ids.push(entry.id);
        }
    }

    // Close everything that is still open, the implicit root last.
    while stack.len() > 1 {
        close_scope(&mut stack, &mut w, options);
    }
    let mut root = stack.pop().expect("root frame always open");
    emit_enumerate(&mut w, options, &mut root.ids);
    w.unindent();
    w.add_line("}");

    Ok(w.build())
}

/// One open namespace scope.
struct ScopeFrame {
    /// Original path segment; empty for the implicit root.
    segment: String,
    /// Ids contributed by this scope's descendants, in visit order.
    ids: Vec<RawId>,
    /// Sanitized child module names, mapped back to their original segment.
    mods: HashMap<String, String>,
    /// Sanitized leaf constant names, mapped back to their original segment.
    consts: HashMap<String, String>,
}

impl ScopeFrame {
    fn new(segment: String) -> Self {
        Self {
            segment,
            ids: Vec::new(),
            mods: HashMap::new(),
            consts: HashMap::new(),
        }
    }
}

fn scope_path(stack: &[ScopeFrame], options: &GenOptions) -> String {
    if stack.len() == 1 {
        return options.module_name.clone();
    }
    stack[1..]
        .iter()
        .map(|f| f.segment.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

fn open_scope(
    stack: &mut Vec<ScopeFrame>,
    w: &mut CodeWriter,
    options: &GenOptions,
    segment: &str,
) -> Result<(), CodegenError> {
    let name = sanitize_mod(segment);
    let scope = scope_path(stack, options);
    let parent = stack.last_mut().expect("root frame always open");
    if let Some(first) = parent.mods.insert(name.clone(), segment.to_string()) {
        return Err(CodegenError::IdentCollision {
            scope,
            ident: name,
            first,
            second: segment.to_string(),
        });
    }
    w.add_line(format!("pub mod {} {{", name));
    w.indent();
    stack.push(ScopeFrame::new(segment.to_string()));
    Ok(())
}

fn close_scope(stack: &mut Vec<ScopeFrame>, w: &mut CodeWriter, options: &GenOptions) {
    let mut frame = stack.pop().expect("close_scope never pops the root");
    emit_enumerate(w, options, &mut frame.ids);
    w.unindent();
    w.add_line("}");
}

/// Emit a scope's `enumerate()` from its accumulated id set.
///
/// Ids arrive in visit order (path order); they are sorted here before
/// compression. One run declares a plain `IdRange`, several declare a
/// `MultiRange`; no ids at all declare the empty `IdRange`.
fn emit_enumerate(w: &mut CodeWriter, options: &GenOptions, ids: &mut Vec<RawId>) {
    ids.sort_unstable();
    let runs = compress_runs(ids);
    let ty = options.id_type();
    match runs.as_slice() {
        [] => emit_id_range(w, options, &ty, Run::new(0, 0)),
        [run] => emit_id_range(w, options, &ty, *run),
        many => {
            w.add_line(format!(
                "pub const fn enumerate() -> {}<{}, {}> {{",
                options.support("MultiRange"),
                ty,
                many.len()
            ));
            w.indent();
            w.add_line(format!("{}::new([", options.support("MultiRange")));
            w.indent();
            for run in many {
                w.add_line(format!(
                    "{}::new({}, {}),",
                    options.support("Run"),
                    run.start,
                    run.end
                ));
            }
            w.unindent();
            w.add_line("])");
            w.unindent();
            w.add_line("}");
        }
    }
}

fn emit_id_range(w: &mut CodeWriter, options: &GenOptions, ty: &str, run: Run) {
    w.add_line(format!(
        "pub const fn enumerate() -> {}<{}> {{",
        options.support("IdRange"),
        ty
    ));
    w.indent();
    w.add_line(format!(
        "{}::new({}, {})",
        options.support("IdRange"),
        run.start,
        run.end
    ));
    w.unindent();
    w.add_line("}");
}

// =============================================================================
// Identifier sanitization
// =============================================================================

fn sanitize_ident(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Leaf segment → constant name (upper-case, identifier-safe).
pub(crate) fn sanitize_const(segment: &str) -> String {
    sanitize_ident(segment).to_ascii_uppercase()
}

/// Directory segment → module name (lower-case, identifier-safe,
/// keyword-proofed).
pub(crate) fn sanitize_mod(segment: &str) -> String {
    let mut name = sanitize_ident(segment).to_ascii_lowercase();
    if is_keyword(&name) {
        name.push('_');
    }
    name
}

fn is_keyword(ident: &str) -> bool {
    matches!(
        ident,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            // Reserved for future use; still illegal as module names.
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "gen"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

// =============================================================================
// Indenting line writer
// =============================================================================

/// Line-oriented writer with structural indentation, so nesting depth and
/// brace balance come from `indent()`/`unindent()` pairs rather than string
/// interpolation.
struct CodeWriter {
    lines: Vec<(u32, String)>,
    indent: u32,
}

impl CodeWriter {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            indent: 0,
        }
    }

    fn add_line(&mut self, line: impl Into<String>) {
        self.lines.push((self.indent, line.into()));
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn unindent(&mut self) {
        assert!(self.indent > 0);
        self.indent -= 1;
    }

    fn build(self) -> String {
        assert_eq!(self.indent, 0, "unbalanced indentation");

        let mut result = String::new();
        for (indent, content) in &self.lines {
            if !content.is_empty() {
                for _ in 0..*indent {
                    result.push_str("    ");
                }
                result.push_str(content);
            }
            result.push('\n');
        }
        result
    }
}
