//! Inline TUI runtime.
//!
//! The runtime renders the root component in place at the current scroll
//! position (no alternate screen) and repaints the full widget block on every
//! update: move to the top of the previous frame, rewrite each line with an
//! erase-to-end, and clear any leftover rows when the block shrinks. Input and
//! resize notifications arrive from terminal threads and are handed to the
//! main loop through a condvar-backed wake.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Condvar, Mutex};

use crate::core::component::Component;
use crate::core::input_event::{parse_input_events, InputEvent};
use crate::core::terminal::Terminal;
use crate::logging::debug_log;

/// Shared handle to a boxed component.
pub type ComponentRc = Rc<RefCell<Box<dyn Component>>>;

const PASTE_ON: &str = "\x1b[?2004h";
const PASTE_OFF: &str = "\x1b[?2004l";
const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";

#[derive(Default)]
struct WakeState {
    inputs: Vec<String>,
    resize: bool,
    render: bool,
    stop: bool,
}

impl WakeState {
    fn has_pending(&self) -> bool {
        !self.inputs.is_empty() || self.resize || self.render || self.stop
    }
}

/// Cross-thread wake for the runtime loop.
pub struct RuntimeWake {
    state: Mutex<WakeState>,
    condvar: Condvar,
}

struct WakeEvents {
    inputs: Vec<String>,
    resize: bool,
    render: bool,
    stop: bool,
}

impl RuntimeWake {
    fn new() -> Self {
        Self {
            state: Mutex::new(WakeState::default()),
            condvar: Condvar::new(),
        }
    }

    fn notify<F: FnOnce(&mut WakeState)>(&self, update: F) {
        let mut state = self.state.lock().expect("wake state lock poisoned");
        update(&mut state);
        self.condvar.notify_one();
    }

    pub fn enqueue_input(&self, data: String) {
        self.notify(|state| state.inputs.push(data));
    }

    pub fn signal_resize(&self) {
        self.notify(|state| state.resize = true);
    }

    pub fn request_render(&self) {
        self.notify(|state| state.render = true);
    }

    pub fn request_stop(&self) {
        self.notify(|state| state.stop = true);
    }

    fn wait(&self) -> WakeEvents {
        let mut state = self.state.lock().expect("wake state lock poisoned");
        while !state.has_pending() {
            state = self
                .condvar
                .wait(state)
                .expect("wake state lock poisoned");
        }
        let events = WakeEvents {
            inputs: std::mem::take(&mut state.inputs),
            resize: state.resize,
            render: state.render,
            stop: state.stop,
        };
        state.resize = false;
        state.render = false;
        events
    }
}

/// Cloneable, thread-safe handle for poking the runtime from outside the loop.
#[derive(Clone)]
pub struct RenderHandle {
    wake: Arc<RuntimeWake>,
}

impl RenderHandle {
    pub fn request_render(&self) {
        self.wake.request_render();
    }

    pub fn request_stop(&self) {
        self.wake.request_stop();
    }
}

pub struct TuiRuntime<T: Terminal> {
    terminal: T,
    root: ComponentRc,
    focus: Option<ComponentRc>,
    wake: Arc<RuntimeWake>,
    previous_line_count: usize,
    previous_cursor_row: usize,
}

impl<T: Terminal> TuiRuntime<T> {
    pub fn new(terminal: T, root: ComponentRc) -> Self {
        Self {
            terminal,
            root,
            focus: None,
            wake: Arc::new(RuntimeWake::new()),
            previous_line_count: 0,
            previous_cursor_row: 0,
        }
    }

    pub fn render_handle(&self) -> RenderHandle {
        RenderHandle {
            wake: Arc::clone(&self.wake),
        }
    }

    /// Route key/text/paste events to `component` instead of the root.
    pub fn set_focus(&mut self, component: ComponentRc) {
        self.clear_focus();
        if let Some(focusable) = component.borrow_mut().as_focusable() {
            focusable.set_focused(true);
        }
        self.focus = Some(component);
    }

    pub fn clear_focus(&mut self) {
        if let Some(previous) = self.focus.take() {
            if let Some(focusable) = previous.borrow_mut().as_focusable() {
                focusable.set_focused(false);
            }
        }
    }

    pub fn start(&mut self) -> std::io::Result<()> {
        let wake_input = Arc::clone(&self.wake);
        let wake_resize = Arc::clone(&self.wake);
        self.terminal.start(
            Box::new(move |data| wake_input.enqueue_input(data)),
            Box::new(move || wake_resize.signal_resize()),
        )?;

        debug_log("runtime started");
        let mut setup = String::new();
        setup.push_str(PASTE_ON);
        setup.push_str(CURSOR_HIDE);
        self.terminal.write(&setup);
        self.do_render();
        Ok(())
    }

    pub fn stop(&mut self) -> std::io::Result<()> {
        self.wake.request_stop();

        // Park the cursor below the widget block so the shell prompt lands
        // cleanly after it.
        let mut teardown = String::new();
        let below = self
            .previous_line_count
            .saturating_sub(1)
            .saturating_sub(self.previous_cursor_row);
        if below > 0 {
            teardown.push_str(&format!("\x1b[{below}B"));
        }
        teardown.push_str("\r\n");
        teardown.push_str(CURSOR_SHOW);
        teardown.push_str(PASTE_OFF);
        self.terminal.write(&teardown);

        self.terminal.drain_input(1000, 50);
        let result = self.terminal.stop();
        debug_log("runtime stopped");
        result
    }

    /// Wait for the next batch of events, apply them, and repaint if needed.
    ///
    /// Returns `false` once a stop has been requested.
    pub fn run_blocking_once(&mut self) -> bool {
        let events = self.wake.wait();
        if events.stop {
            return false;
        }

        let mut needs_render = events.render;

        for chunk in events.inputs {
            for event in parse_input_events(&chunk) {
                self.dispatch(&event);
            }
            needs_render = true;
        }

        if events.resize {
            let resize = InputEvent::Resize {
                columns: self.terminal.columns(),
                rows: self.terminal.rows(),
            };
            self.root.borrow_mut().handle_event(&resize);
            self.root.borrow_mut().invalidate();
            needs_render = true;
        }

        if needs_render {
            self.do_render();
        }
        true
    }

    fn dispatch(&mut self, event: &InputEvent) {
        if let Some(focus) = self.focus.as_ref() {
            focus.borrow_mut().handle_event(event);
        } else {
            self.root.borrow_mut().handle_event(event);
        }
    }

    fn do_render(&mut self) {
        let width = self.terminal.columns() as usize;
        let lines = self.root.borrow_mut().render(width);
        let cursor = self.root.borrow().cursor_pos();

        let mut frame = String::new();
        frame.push('\r');
        if self.previous_cursor_row > 0 {
            frame.push_str(&format!("\x1b[{}A", self.previous_cursor_row));
        }

        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                frame.push_str("\r\n");
            }
            frame.push_str(line);
            frame.push_str("\x1b[K");
        }
        if lines.len() < self.previous_line_count {
            frame.push_str("\x1b[0J");
        }

        let mut end_row = lines.len().saturating_sub(1);
        if let Some(pos) = cursor {
            if pos.row < lines.len() {
                let up = end_row - pos.row;
                if up > 0 {
                    frame.push_str(&format!("\x1b[{up}A"));
                }
                frame.push('\r');
                if pos.col > 0 {
                    frame.push_str(&format!("\x1b[{}C", pos.col));
                }
                end_row = pos.row;
            }
        }

        self.previous_line_count = lines.len();
        self.previous_cursor_row = end_row;
        self.terminal.write(&frame);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    use super::{ComponentRc, TuiRuntime};
    use crate::core::component::Component;
    use crate::core::terminal::Terminal;
    use crate::widgets::tag_field::{TagField, TagFieldOptions, TagFieldTheme};

    type InputHandler = Box<dyn FnMut(String) + Send>;

    struct TestTerminal {
        writes: Arc<Mutex<Vec<String>>>,
        on_input: Arc<Mutex<Option<InputHandler>>>,
    }

    impl TestTerminal {
        fn new() -> (Self, Arc<Mutex<Vec<String>>>, Arc<Mutex<Option<InputHandler>>>) {
            let writes = Arc::new(Mutex::new(Vec::new()));
            let on_input = Arc::new(Mutex::new(None));
            let terminal = Self {
                writes: Arc::clone(&writes),
                on_input: Arc::clone(&on_input),
            };
            (terminal, writes, on_input)
        }
    }

    impl Terminal for TestTerminal {
        fn start(
            &mut self,
            on_input: Box<dyn FnMut(String) + Send>,
            _on_resize: Box<dyn FnMut() + Send>,
        ) -> std::io::Result<()> {
            *self.on_input.lock().expect("handler lock") = Some(on_input);
            Ok(())
        }

        fn stop(&mut self) -> std::io::Result<()> {
            *self.on_input.lock().expect("handler lock") = None;
            Ok(())
        }

        fn drain_input(&mut self, _max_ms: u64, _idle_ms: u64) {}

        fn write(&mut self, data: &str) {
            self.writes.lock().expect("writes lock").push(data.to_string());
        }

        fn columns(&self) -> u16 {
            40
        }

        fn rows(&self) -> u16 {
            12
        }
    }

    fn tag_field_root() -> ComponentRc {
        let field = TagField::new(
            TagFieldTheme::plain(),
            TagFieldOptions {
                initial_tags: Vec::new(),
                placeholder: "type here".to_string(),
            },
        );
        Rc::new(RefCell::new(Box::new(field) as Box<dyn Component>))
    }

    fn feed(handler: &Arc<Mutex<Option<InputHandler>>>, data: &str) {
        let mut guard = handler.lock().expect("handler lock");
        let callback = guard.as_mut().expect("terminal not started");
        callback(data.to_string());
    }

    #[test]
    fn start_enables_paste_hides_cursor_and_paints() {
        let (terminal, writes, _handler) = TestTerminal::new();
        let mut tui = TuiRuntime::new(terminal, tag_field_root());
        tui.start().expect("runtime start");

        let writes = writes.lock().expect("writes lock");
        assert!(writes[0].contains("\x1b[?2004h"));
        assert!(writes[0].contains("\x1b[?25l"));
        assert!(writes[1].contains("type here"));
    }

    #[test]
    fn input_wakes_the_loop_and_repaints() {
        let (terminal, writes, handler) = TestTerminal::new();
        let root = tag_field_root();
        let mut tui = TuiRuntime::new(terminal, Rc::clone(&root));
        tui.start().expect("runtime start");
        tui.set_focus(Rc::clone(&root));

        feed(&handler, "hi ");
        assert!(tui.run_blocking_once());

        let writes = writes.lock().expect("writes lock");
        let frame = writes.last().expect("missing frame");
        assert!(frame.contains(" hi "), "tag pill missing from frame: {frame:?}");
    }

    #[test]
    fn render_handle_triggers_repaint_without_input() {
        let (terminal, writes, _handler) = TestTerminal::new();
        let mut tui = TuiRuntime::new(terminal, tag_field_root());
        tui.start().expect("runtime start");

        let frames_before = writes.lock().expect("writes lock").len();
        tui.render_handle().request_render();
        assert!(tui.run_blocking_once());
        assert!(writes.lock().expect("writes lock").len() > frames_before);
    }

    #[test]
    fn stop_request_ends_the_loop() {
        let (terminal, _writes, _handler) = TestTerminal::new();
        let mut tui = TuiRuntime::new(terminal, tag_field_root());
        tui.start().expect("runtime start");

        tui.render_handle().request_stop();
        assert!(!tui.run_blocking_once());
    }

    #[test]
    fn stop_shows_cursor_and_disables_paste() {
        let (terminal, writes, _handler) = TestTerminal::new();
        let mut tui = TuiRuntime::new(terminal, tag_field_root());
        tui.start().expect("runtime start");
        tui.stop().expect("runtime stop");

        let writes = writes.lock().expect("writes lock");
        let teardown = writes.last().expect("missing teardown");
        assert!(teardown.contains("\x1b[?25h"));
        assert!(teardown.contains("\x1b[?2004l"));
    }
}
