use std::fmt;

/// Auxiliary selector shown above the field list. Never part of the form
/// definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualification {
    Hsc,
    Diploma,
    Ug,
    Pg,
    GovernmentServant,
}

impl Qualification {
    pub const ALL: [Qualification; 5] = [
        Qualification::Hsc,
        Qualification::Diploma,
        Qualification::Ug,
        Qualification::Pg,
        Qualification::GovernmentServant,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Self::Hsc => "HSC",
            Self::Diploma => "Diploma",
            Self::Ug => "UG",
            Self::Pg => "PG",
            Self::GovernmentServant => "government_servant",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Self::GovernmentServant => "Government Servant",
            other => other.value(),
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.value() == value)
    }

    /// Label of the marks input revealed for this selection, if any.
    pub fn marks_label(self) -> Option<String> {
        match self {
            Self::GovernmentServant => None,
            other => Some(format!("{} Marks", other.value())),
        }
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}

/// Selected qualification plus the text of its marks input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualificationState {
    selected: Option<Qualification>,
    marks: String,
}

impl QualificationState {
    pub fn selected(&self) -> Option<Qualification> {
        self.selected
    }

    pub fn marks(&self) -> &str {
        &self.marks
    }

    pub fn marks_mut(&mut self) -> &mut String {
        &mut self.marks
    }

    /// Any selection shows the qualification panel.
    pub fn shows_panel(&self) -> bool {
        self.selected.is_some()
    }

    pub fn marks_label(&self) -> Option<String> {
        self.selected.and_then(Qualification::marks_label)
    }

    /// A different selection starts its marks input empty.
    pub fn select(&mut self, selected: Option<Qualification>) {
        if self.selected != selected {
            self.marks.clear();
        }
        self.selected = selected;
    }

    /// Steps through `<none>` then each qualification, wrapping around.
    pub fn cycle(&mut self, forward: bool) {
        let slots = Qualification::ALL.len() + 1;
        let current = self
            .selected
            .and_then(|q| Qualification::ALL.iter().position(|c| *c == q))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let selected = next.checked_sub(1).map(|idx| Qualification::ALL[idx]);
        self.select(selected);
    }
}
