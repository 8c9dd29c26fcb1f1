use super::*;

impl App {
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        // Always active, even while an input has focus.
        match key.code {
            KeyCode::Esc => {
                self.back();
                return;
            }
            KeyCode::Tab if self.view == View::Table => {
                self.cycle_input_focus();
                return;
            }
            _ => {}
        }
        if self.view == View::Table && self.search.input_focus != InputFocus::None {
            self.handle_input_key(key);
            return;
        }

        match self.view {
            View::Table => self.handle_table_key(key),
            View::Detail => self.handle_detail_key(key),
            View::CommentThread => self.handle_comments_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.set_input_focus(InputFocus::None);
                return;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(text) = self.focused_text_mut() {
                    text.clear();
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(text) = self.focused_text_mut() {
                    text.push(ch);
                }
            }
            _ => return,
        }
        self.rebuild_filter();
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('f') => self.toggle_filters(),
            KeyCode::Char('s') if !self.search.filters_visible => {
                self.set_input_focus(InputFocus::Search);
            }
            KeyCode::Char('p') => self.toggle_preview(),
            KeyCode::Char('r') => self.request_refresh(false),
            KeyCode::Char('R') => self.request_refresh(true),
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('y') => self.copy_body(),
            KeyCode::Char(ch) if QuickFilter::index_for_key(ch).is_some() => {
                if let Some(index) = QuickFilter::index_for_key(ch) {
                    self.toggle_quick_filter(index);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-self.page_size()),
            KeyCode::PageDown => self.move_selection(self.page_size()),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Enter => self.open_selected(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') => self.request_comments(),
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('y') => self.copy_body(),
            KeyCode::Char('r') => self.request_refresh(false),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::PageUp => self.scroll(-i32::from(self.layout.detail_height)),
            KeyCode::PageDown => self.scroll(i32::from(self.layout.detail_height)),
            KeyCode::Home | KeyCode::Char('g') => self.scroll(i32::MIN),
            KeyCode::End | KeyCode::Char('G') => self.scroll(i32::MAX),
            _ => {}
        }
    }

    fn handle_comments_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('o') => self.open_in_browser(),
            KeyCode::Char('y') => self.copy_body(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll(1),
            KeyCode::PageUp => self.scroll(-i32::from(self.layout.detail_height)),
            KeyCode::PageDown => self.scroll(i32::from(self.layout.detail_height)),
            KeyCode::Home | KeyCode::Char('g') => self.scroll(i32::MIN),
            KeyCode::End | KeyCode::Char('G') => self.scroll(i32::MAX),
            _ => {}
        }
    }
}
