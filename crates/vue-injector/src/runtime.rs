//! The TypeScript modules that transformed components import.
//!
//! `runtime.ts` provides `inject`, which installs the compiled render
//! functions on a component constructor. `built-in.ts` provides the
//! `ReservedTag` union used by generated `_c` declarations.

/// HTML tag names the template compiler treats as platform elements.
pub const HTML_TAGS: &[&str] = &[
    "html", "body", "base", "head", "link", "meta", "style", "title", "address", "article",
    "aside", "footer", "header", "h1", "h2", "h3", "h4", "h5", "h6", "hgroup", "nav", "section",
    "div", "dd", "dl", "dt", "figcaption", "figure", "hr", "img", "li", "main", "ol", "p", "pre",
    "ul", "a", "b", "abbr", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em", "i", "kbd",
    "mark", "q", "rp", "rt", "rtc", "ruby", "s", "samp", "small", "span", "strong", "sub", "sup",
    "time", "u", "let", "wbr", "area", "audio", "map", "track", "video", "embed", "object",
    "param", "source", "canvas", "script", "noscript", "del", "ins", "caption", "col",
    "colgroup", "table", "thead", "tbody", "td", "th", "tr", "button", "datalist", "fieldset",
    "form", "input", "label", "legend", "meter", "optgroup", "option", "output", "progress",
    "select", "textarea", "details", "dialog", "menu", "menuitem", "summary", "content",
    "element", "shadow", "template",
];

/// SVG tag names the template compiler treats as platform elements.
pub const SVG_TAGS: &[&str] = &[
    "svg", "animate", "circle", "clippath", "cursor", "defs", "desc", "ellipse", "filter",
    "font-face", "foreignObject", "g", "glyph", "image", "line", "marker", "mask",
    "missing-glyph", "path", "pattern", "polygon", "polyline", "rect", "switch", "symbol",
    "text", "textpath", "tspan", "use", "view",
];

/// Returns true if `tag` is a reserved HTML or SVG tag name.
pub fn is_reserved_tag(tag: &str) -> bool {
    HTML_TAGS.contains(&tag) || SVG_TAGS.contains(&tag)
}

/// Render helpers the compiled code calls on `this`. They are typed loosely;
/// only `_c` gets real signatures.
const RENDER_HELPERS: &[&str] = &[
    "_o", "_n", "_s", "_l", "_t", "_q", "_i", "_m", "_f", "_k", "_b", "_v", "_e", "_u",
];

/// Source of `runtime.ts`.
pub fn runtime_source() -> String {
    let mut out = String::from(
        "import Vue from 'vue'\n\
         \n\
         export function inject (\n  \
         Ctor: any /* typeof Vue */,\n  \
         render: Function,\n  \
         staticRenderFns: Function[]\n\
         ): void {\n  \
         Ctor.options.render = render\n  \
         Ctor.options.staticRenderFns = staticRenderFns\n\
         }\n\
         \n\
         declare module 'vue/types/vue' {\n  \
         interface Vue {\n",
    );
    for helper in RENDER_HELPERS {
        out.push_str(&format!("    {helper}: Function\n"));
    }
    out.push_str("    _self: this\n  }\n}\n");
    out
}

/// Source of `built-in.ts`.
pub fn built_in_source() -> String {
    let mut out = String::new();
    push_union(&mut out, "HTMLTag", HTML_TAGS);
    out.push('\n');
    push_union(&mut out, "SVGTag", SVG_TAGS);
    out.push_str("\nexport type ReservedTag = HTMLTag | SVGTag\n");
    out
}

fn push_union(out: &mut String, name: &str, tags: &[&str]) {
    out.push_str(&format!("export type {name} =\n"));
    for (line, chunk) in tags.chunks(8).enumerate() {
        let members: Vec<String> = chunk.iter().map(|tag| format!("'{tag}'")).collect();
        let prefix = if line == 0 { "  " } else { "  | " };
        out.push_str(prefix);
        out.push_str(&members.join(" | "));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_tags() {
        assert!(is_reserved_tag("div"));
        assert!(is_reserved_tag("foreignObject"));
        assert!(is_reserved_tag("missing-glyph"));
        assert!(!is_reserved_tag("my-button"));
        assert!(!is_reserved_tag("Div"));
    }

    #[test]
    fn test_built_in_source_lists_every_tag() {
        let source = built_in_source();
        for tag in HTML_TAGS.iter().chain(SVG_TAGS) {
            assert!(source.contains(&format!("'{tag}'")), "missing {tag}");
        }
        assert!(source.starts_with("export type HTMLTag =\n  'html' | 'body'"));
        assert!(source.ends_with("export type ReservedTag = HTMLTag | SVGTag\n"));
    }

    #[test]
    fn test_runtime_source() {
        insta::assert_snapshot!(runtime_source().trim_end(), @r"
        import Vue from 'vue'

        export function inject (
          Ctor: any /* typeof Vue */,
          render: Function,
          staticRenderFns: Function[]
        ): void {
          Ctor.options.render = render
          Ctor.options.staticRenderFns = staticRenderFns
        }

        declare module 'vue/types/vue' {
          interface Vue {
            _o: Function
            _n: Function
            _s: Function
            _l: Function
            _t: Function
            _q: Function
            _i: Function
            _m: Function
            _f: Function
            _k: Function
            _b: Function
            _v: Function
            _e: Function
            _u: Function
            _self: this
          }
        }
        ");
    }
}
