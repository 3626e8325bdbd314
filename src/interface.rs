//! Renderer-agnostic description of socket UI
//!
//! Declarations describe what should be drawn next to each socket; the host
//! editor turns these elements into widgets and runs the bound operator
//! calls when buttons are pressed.

use crate::operators::OperatorCall;

/// UI element types for socket rows
#[derive(Debug, Clone, PartialEq)]
pub enum UIElement {
    Label(String),
    /// The socket itself, drawn by the host with the given text
    Socket { identifier: String, text: String },
    /// Button running an operator call when pressed
    Button {
        text: String,
        icon: Option<&'static str>,
        call: OperatorCall,
    },
    Row(Vec<UIElement>),
    Column(Vec<UIElement>),
}

impl UIElement {
    /// All operator calls bound anywhere in this element, depth first
    pub fn operator_calls(&self) -> Vec<&OperatorCall> {
        let mut calls = Vec::new();
        self.collect_calls(&mut calls);
        calls
    }

    fn collect_calls<'a>(&'a self, calls: &mut Vec<&'a OperatorCall>) {
        match self {
            UIElement::Button { call, .. } => calls.push(call),
            UIElement::Row(children) | UIElement::Column(children) => {
                for child in children {
                    child.collect_calls(calls);
                }
            }
            UIElement::Label(_) | UIElement::Socket { .. } => {}
        }
    }
}
