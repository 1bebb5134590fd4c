//! Typing `_c` for locally registered child components.
//!
//! `@Component({ components: { MyButton, 'x-list': XList } })` registers tags
//! the compiled render function passes to `_c`. Declaring one overload per
//! tag lets the type checker resolve `_c("my-button", ...)` while every
//! other name must be a reserved HTML or SVG tag.

use crate::runtime::is_reserved_tag;
use rustc_hash::FxHashSet;
use swc_ecma_ast::{Class, Expr, ObjectLit, Prop, PropName, PropOrSpread};

/// Inserts a hyphen before interior uppercase letters, then lowercases.
///
/// A letter already preceded by a hyphen or by another uppercase letter is
/// left alone, so `MyHTMLWidget` becomes `my-htmlwidget`.
pub fn hyphenate(name: &str) -> String {
    let once = hyphenate_pass(name);
    hyphenate_pass(&once).to_lowercase()
}

fn hyphenate_pass(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if let Some(p) = prev {
            if c.is_ascii_uppercase() && p != '-' && !p.is_ascii_uppercase() {
                out.push('-');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Child tag names registered by the class decorators, hyphen-cased and
/// de-duplicated in first-seen order.
pub fn collect_child_tags(class: &Class) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut tags = Vec::new();

    for decorator in &class.decorators {
        let Expr::Call(call) = &*decorator.expr else {
            continue;
        };
        let [arg] = call.args.as_slice() else {
            continue;
        };
        if arg.spread.is_some() {
            continue;
        }
        let Expr::Object(options) = &*arg.expr else {
            continue;
        };
        let Some(components) = property_value(options, "components") else {
            continue;
        };
        let Expr::Object(components) = components else {
            continue;
        };

        for key in components.props.iter().filter_map(prop_key) {
            let tag = hyphenate(&key);
            if is_reserved_tag(&tag) {
                tracing::warn!(tag = %tag, "child component shadows a reserved tag name");
            }
            if seen.insert(tag.clone()) {
                tags.push(tag);
            }
        }
    }

    tags
}

/// The `declare _c: { ... }` class member for `tags`.
pub fn render_declaration(tags: &[String]) -> String {
    let mut out = String::from("\n  declare _c: {\n");
    for tag in tags {
        out.push_str(&format!(
            "    (tag: \"{}\", data?: any, children?: any): any\n",
            escape_string_literal(tag)
        ));
    }
    out.push_str("    (tag: ReservedTag, data?: any, children?: any): any\n  }\n");
    out
}

fn property_value<'a>(object: &'a ObjectLit, name: &str) -> Option<&'a Expr> {
    object.props.iter().find_map(|prop| match prop {
        PropOrSpread::Prop(prop) => match &**prop {
            Prop::KeyValue(kv) if prop_name(&kv.key).as_deref() == Some(name) => Some(&*kv.value),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    })
}

fn prop_key(prop: &PropOrSpread) -> Option<String> {
    let PropOrSpread::Prop(prop) = prop else {
        return None;
    };
    match &**prop {
        Prop::Shorthand(ident) => Some(ident.sym.to_string()),
        Prop::KeyValue(kv) => prop_name(&kv.key),
        _ => None,
    }
}

fn prop_name(name: &PropName) -> Option<String> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string_lossy().into_owned()),
        _ => None,
    }
}

fn escape_string_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptSnapshot;
    use pretty_assertions::assert_eq;
    use swc_ecma_ast::{DefaultDecl, ModuleDecl, ModuleItem};

    fn tags_of(source: &str) -> Vec<String> {
        let script = ScriptSnapshot::parse("Test.vue", source).unwrap();
        let class = script
            .module()
            .body
            .iter()
            .find_map(|item| match item {
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                    match &export.decl {
                        DefaultDecl::Class(class) => Some(class.class.clone()),
                        _ => None,
                    }
                }
                _ => None,
            })
            .unwrap();
        collect_child_tags(&class)
    }

    #[test]
    fn test_hyphenate() {
        assert_eq!(hyphenate("MyButton"), "my-button");
        assert_eq!(hyphenate("myButton"), "my-button");
        assert_eq!(hyphenate("Foo-Bar"), "foo-bar");
        assert_eq!(hyphenate("MyHTMLWidget"), "my-htmlwidget");
        assert_eq!(hyphenate("aBcD"), "a-bc-d");
        assert_eq!(hyphenate("plain"), "plain");
        assert_eq!(hyphenate(""), "");
    }

    #[test]
    fn test_collects_direct_keys_only() {
        let tags = tags_of(
            r#"@Component({
  components: {
    ChildA,
    'child-b': ChildB,
    Inline: { components: { Nested } },
  }
})
export default class App extends Vue {}"#,
        );
        assert_eq!(tags, ["child-a", "child-b", "inline"]);
    }

    #[test]
    fn test_deduplicates_in_order() {
        let tags = tags_of(
            "@Component({ components: { FooBar, fooBar, Baz } })\nexport default class A {}",
        );
        assert_eq!(tags, ["foo-bar", "baz"]);
    }

    #[test]
    fn test_ignores_other_decorator_shapes() {
        assert!(tags_of("@Component\nexport default class A {}").is_empty());
        assert!(tags_of("@Component({ components: Registry })\nexport default class A {}").is_empty());
        assert!(tags_of("@Component({ components: { A } }, extra)\nexport default class A {}").is_empty());
    }

    #[test]
    fn test_render_declaration() {
        let decl = render_declaration(&["child-a".to_string()]);
        assert_eq!(
            decl,
            "\n  declare _c: {\n    (tag: \"child-a\", data?: any, children?: any): any\n    (tag: ReservedTag, data?: any, children?: any): any\n  }\n"
        );
    }
}
