use relationship_view::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Mock OutputPresenter that keeps every rendering
#[derive(Default, Clone)]
pub struct MockPresenter {
    pub lines: Rc<RefCell<Vec<String>>>,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl OutputPresenter for MockPresenter {
    fn present(&self, content: &str) -> Result<()> {
        self.lines.borrow_mut().push(content.to_string());
        Ok(())
    }
}
