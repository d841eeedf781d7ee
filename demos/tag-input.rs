use std::cell::RefCell;
use std::rc::Rc;

use tagfield_tui::{
    Component, Focusable, HostView, HostViewOptions, InputEvent, ProcessTerminal, TagField,
    TagFieldOptions, TagFieldTheme, TUI,
};

struct HostWrapper {
    host: HostView,
    exit_flag: Rc<RefCell<bool>>,
}

impl Component for HostWrapper {
    fn render(&mut self, width: usize) -> Vec<String> {
        self.host.render(width)
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if matches!(event, InputEvent::Key { key_id, .. } if key_id == "ctrl+c") {
            *self.exit_flag.borrow_mut() = true;
            return;
        }
        self.host.handle_event(event);
    }

    fn cursor_pos(&self) -> Option<tagfield_tui::CursorPos> {
        self.host.cursor_pos()
    }

    fn invalidate(&mut self) {
        self.host.invalidate();
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for HostWrapper {
    fn set_focused(&mut self, focused: bool) {
        self.host.set_focused(focused);
    }

    fn is_focused(&self) -> bool {
        self.host.is_focused()
    }
}

fn main() -> std::io::Result<()> {
    let field = Rc::new(RefCell::new(TagField::new(
        TagFieldTheme::for_mode(tagfield_tui::DisplayMode::Light),
        TagFieldOptions {
            initial_tags: vec!["rust".to_string(), "tui".to_string(), "tags".to_string()],
            placeholder: "Type something...".to_string(),
        },
    )));

    let host = HostView::new(Rc::clone(&field), HostViewOptions::default());

    let exit_flag = Rc::new(RefCell::new(false));
    let root: Rc<RefCell<Box<dyn Component>>> = Rc::new(RefCell::new(Box::new(HostWrapper {
        host,
        exit_flag: Rc::clone(&exit_flag),
    })));

    let terminal = ProcessTerminal::new();
    let mut tui = TUI::new(terminal, Rc::clone(&root));
    tui.set_focus(Rc::clone(&root));

    let render_handle = tui.render_handle();
    field
        .borrow_mut()
        .set_on_change(Some(Box::new(move |_tags| {
            render_handle.request_render();
        })));

    tui.start()?;

    loop {
        tui.run_blocking_once();

        if *exit_flag.borrow() {
            break;
        }
    }

    tui.stop()?;
    Ok(())
}
