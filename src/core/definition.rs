use crate::core::field::FormField;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormDefinition {
    pub name: String,
    pub fields: Vec<FormField>,
}

impl FormDefinition {
    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }
}
