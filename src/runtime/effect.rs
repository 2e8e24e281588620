use crate::widgets::traits::WidgetAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Action(WidgetAction),
    RequestRender,
}
