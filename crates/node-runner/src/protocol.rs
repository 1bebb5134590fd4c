//! Line-delimited JSON messages exchanged with the runner script.

use crate::error::NodeError;
use serde::{Deserialize, Serialize};
use vue_injector::{CompiledTemplate, TemplateOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RequestKind {
    Compile,
    Transpile,
}

#[derive(Debug, Serialize)]
pub(crate) struct Request<'a> {
    pub id: u64,
    pub kind: RequestKind,
    pub source: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Ready {
    pub ready: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Response {
    pub id: Option<u64>,
    pub render: Option<String>,
    pub static_render_fns: Option<Vec<String>>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub code: Option<String>,
    pub error: Option<String>,
}

impl Response {
    pub fn parse(line: &str) -> Result<Self, NodeError> {
        serde_json::from_str(line)
            .map_err(|e| NodeError::Parse(format!("invalid response: {e} ({line})")))
    }

    /// Interprets the response to a compile request.
    pub fn into_template_output(self) -> Result<TemplateOutput, NodeError> {
        if let Some(error) = self.error {
            return Err(NodeError::Remote(error));
        }
        if !self.errors.is_empty() {
            return Ok(TemplateOutput::Diagnostics(self.errors));
        }
        let render = self
            .render
            .ok_or_else(|| NodeError::Protocol("compile response without render".to_string()))?;
        Ok(TemplateOutput::Compiled(CompiledTemplate {
            render,
            static_render_fns: self.static_render_fns.unwrap_or_default(),
        }))
    }

    /// Interprets the response to a transpile request.
    pub fn into_code(self) -> Result<String, NodeError> {
        if let Some(error) = self.error {
            return Err(NodeError::Remote(error));
        }
        self.code
            .ok_or_else(|| NodeError::Protocol("transpile response without code".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_shape() {
        let request = Request {
            id: 3,
            kind: RequestKind::Transpile,
            source: "(function(){})()",
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"id":3,"kind":"transpile","source":"(function(){})()"}"#
        );
    }

    #[test]
    fn test_compiled_response() {
        let response = Response::parse(
            r#"{"id":1,"render":"with(this){return _c('div')}","staticRenderFns":["a"],"errors":[]}"#,
        )
        .unwrap();
        assert_eq!(response.id, Some(1));
        assert_eq!(
            response.into_template_output().unwrap(),
            TemplateOutput::Compiled(CompiledTemplate {
                render: "with(this){return _c('div')}".to_string(),
                static_render_fns: vec!["a".to_string()],
            })
        );
    }

    #[test]
    fn test_diagnostics_response() {
        let response =
            Response::parse(r#"{"id":1,"render":"","staticRenderFns":[],"errors":["bad"]}"#)
                .unwrap();
        assert_eq!(
            response.into_template_output().unwrap(),
            TemplateOutput::Diagnostics(vec!["bad".to_string()])
        );
    }

    #[test]
    fn test_error_response() {
        let response = Response::parse(r#"{"id":2,"error":"Unexpected token"}"#).unwrap();
        let err = response.into_code().unwrap_err();
        assert!(matches!(err, NodeError::Remote(ref message) if message == "Unexpected token"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Response::parse("ready"), Err(NodeError::Parse(_))));
    }
}
