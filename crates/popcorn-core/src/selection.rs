/// Which movie, if any, is open in the detail pane.
///
/// Holds only the catalog id; the detail itself is refetched on every transition into `Viewing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Viewing(String),
}

impl Selection {
    /// Toggle: selecting the open id closes it, any other id opens that one
    pub fn select(&mut self, id: &str) {
        *self = match &*self {
            Selection::Viewing(current) if current == id => Selection::Idle,
            _ => Selection::Viewing(id.to_string()),
        };
    }

    pub fn close(&mut self) {
        *self = Selection::Idle;
    }

    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Selection::Idle => None,
            Selection::Viewing(id) => Some(id.as_str()),
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, Selection::Viewing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_twice_returns_to_idle() {
        let mut selection = Selection::default();
        selection.select("tt0468569");
        assert_eq!(selection.selected_id(), Some("tt0468569"));
        selection.select("tt0468569");
        assert_eq!(selection, Selection::Idle);
    }

    #[test]
    fn test_select_other_switches() {
        let mut selection = Selection::default();
        selection.select("tt1");
        selection.select("tt2");
        assert_eq!(selection, Selection::Viewing("tt2".to_string()));
    }

    #[test]
    fn test_close_is_unconditional() {
        let mut selection = Selection::default();
        selection.close();
        assert!(!selection.is_viewing());
        selection.select("tt1");
        selection.close();
        assert_eq!(selection, Selection::Idle);
    }
}
