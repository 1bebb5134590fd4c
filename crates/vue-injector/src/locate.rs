//! Finding the component declaration in a script.

use crate::components::collect_child_tags;
use crate::error::TransformError;
use crate::script::ScriptSnapshot;
use swc_ecma_ast::{
    CallExpr, DefaultDecl, ExportDefaultDecl, ExportDefaultExpr, Expr, ExprOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};
use text_span::{ByteOffset, Span};

/// The default-exported component, in one of the two supported shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentTarget {
    /// `export default class Name ... { }`
    Class(ClassTarget),
    /// `export default factory({ ... })`
    Options(OptionsTarget),
}

impl ComponentTarget {
    /// Start of the declaration in the script text.
    pub fn start(&self) -> ByteOffset {
        match self {
            ComponentTarget::Class(class) => class.span.start,
            ComponentTarget::Options(options) => options.span.start,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTarget {
    pub name: String,
    /// The class, decorators included when swc attaches them.
    pub span: Span,
    /// Offset of the class body's closing `}`.
    pub closing_brace: ByteOffset,
    /// Hyphen-cased keys of the decorator `components` map.
    pub child_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsTarget {
    /// The options object literal.
    pub span: Span,
}

impl OptionsTarget {
    /// Offset just past the opening `{`.
    pub fn after_open_brace(&self) -> ByteOffset {
        self.span.start + ByteOffset::from(1u32)
    }
}

/// Finds the component declaration of `script`.
///
/// Returns `Ok(None)` when the default export has neither shape. When more
/// than one candidate exists the first in source order wins.
pub fn locate(script: &ScriptSnapshot) -> Result<Option<ComponentTarget>, TransformError> {
    let mut collector = TargetCollector {
        script,
        found: Vec::new(),
    };
    script.module().visit_with(&mut collector);

    let mut found = collector.found.into_iter();
    let Some(first) = found.next() else {
        return Ok(None);
    };
    for extra in found {
        tracing::warn!(
            file = script.file_name(),
            offset = u32::from(extra.start()),
            "ignoring additional default-exported component"
        );
    }

    match first {
        Candidate::Target(target) => Ok(Some(target)),
        Candidate::UnnamedClass(span) => Err(TransformError::UnnamedComponentClass {
            file_name: script.file_name().to_string(),
            span,
        }),
    }
}

enum Candidate {
    Target(ComponentTarget),
    UnnamedClass(Span),
}

impl Candidate {
    fn start(&self) -> ByteOffset {
        match self {
            Candidate::Target(target) => target.start(),
            Candidate::UnnamedClass(span) => span.start,
        }
    }
}

struct TargetCollector<'a> {
    script: &'a ScriptSnapshot,
    found: Vec<Candidate>,
}

impl Visit for TargetCollector<'_> {
    fn visit_export_default_decl(&mut self, export: &ExportDefaultDecl) {
        if let DefaultDecl::Class(class_expr) = &export.decl {
            let class = &class_expr.class;
            let span = self.script.span(class.span);
            let candidate = match &class_expr.ident {
                Some(ident) => {
                    // Class spans end at the closing brace.
                    let source = self.script.source_of(class.span);
                    let Some(close) = source.rfind('}') else {
                        return;
                    };
                    Candidate::Target(ComponentTarget::Class(ClassTarget {
                        name: ident.sym.to_string(),
                        span,
                        closing_brace: span.start + ByteOffset::from(close as u32),
                        child_tags: collect_child_tags(class),
                    }))
                }
                None => Candidate::UnnamedClass(span),
            };
            self.found.push(candidate);
        }
        export.visit_children_with(self);
    }

    fn visit_export_default_expr(&mut self, export: &ExportDefaultExpr) {
        if let Expr::Call(call) = &*export.expr {
            if let Some(span) = options_object(call) {
                self.found.push(Candidate::Target(ComponentTarget::Options(
                    OptionsTarget {
                        span: self.script.span(span),
                    },
                )));
            }
        }
        export.visit_children_with(self);
    }
}

/// The span of `call`'s first argument when it is an object literal.
fn options_object(call: &CallExpr) -> Option<swc_common::Span> {
    match call.args.first()? {
        ExprOrSpread { spread: None, expr } => match &**expr {
            Expr::Object(object) => Some(object.span),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn locate_in(source: &str) -> Result<Option<ComponentTarget>, TransformError> {
        let script = ScriptSnapshot::parse("Test.vue", source).unwrap();
        locate(&script)
    }

    #[test]
    fn test_finds_named_class() {
        let source = "import Vue from 'vue'\nexport default class Hello extends Vue {\n  msg = 'hi'\n}\n";
        let Some(ComponentTarget::Class(class)) = locate_in(source).unwrap() else {
            panic!("expected a class target");
        };
        assert_eq!(class.name, "Hello");
        let close = u32::from(class.closing_brace) as usize;
        assert_eq!(&source[close..], "}\n");
        assert!(class.child_tags.is_empty());
    }

    #[test]
    fn test_finds_options_object() {
        let source = "import Vue from 'vue'\nexport default Vue.extend({ name: 'x' })";
        let Some(ComponentTarget::Options(options)) = locate_in(source).unwrap() else {
            panic!("expected an options target");
        };
        let at = u32::from(options.after_open_brace()) as usize;
        assert_eq!(&source[at..], " name: 'x' })");
    }

    #[test]
    fn test_unnamed_class_is_an_error() {
        let err = locate_in("export default class extends Vue {}").unwrap_err();
        assert!(matches!(err, TransformError::UnnamedComponentClass { .. }));
    }

    #[test]
    fn test_other_shapes_are_ignored() {
        assert_eq!(locate_in("export default {}").unwrap(), None);
        assert_eq!(locate_in("export default make(options)").unwrap(), None);
        assert_eq!(locate_in("class A {}\nexport default A").unwrap(), None);
        assert_eq!(locate_in("export class A {}").unwrap(), None);
    }

    #[test]
    fn test_decorated_class() {
        let source = "@Component({ components: { MyButton } })\nexport default class App extends Vue {}";
        let Some(ComponentTarget::Class(class)) = locate_in(source).unwrap() else {
            panic!("expected a class target");
        };
        assert_eq!(class.name, "App");
        assert_eq!(class.child_tags, ["my-button"]);
        assert_eq!(u32::from(class.closing_brace) as usize, source.len() - 1);
    }
}
