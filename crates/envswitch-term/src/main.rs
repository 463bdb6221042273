#![forbid(unsafe_code)]

//! EnvSwitch demo: a small host screen with the environment switcher on top.
//!
//! Click the floating trigger to pick a backend, drag it to move it, press
//! `m` to open a host modal (the trigger is inert while it is shown), and
//! `q` to quit. The selection is kept in the state file between runs.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use envswitch_core::catalog::Environment;
use envswitch_core::geometry::Point;
use envswitch_core::store::FileStore;
use envswitch_runtime::controller::{ControllerConfig, EnvironmentController};
use envswitch_term::buffer::{CellBuffer, CellStyle};
use envswitch_term::presenter::TerminalPresenter;
use envswitch_term::{App, Flow, HostView, Key, SessionOptions, TermConfig, TerminalSession};
use envswitch_widgets::surface::{
    Surface, SurfaceItem, SurfaceKind, SurfaceResponse, SurfaceStyle, TopPresenter,
};

const APP_NAME: &str = "envswitch-demo";

envswitch_core::environments! {
    /// Backends the demo can talk to.
    pub enum Backend {
        Production => "https://production.server.com/",
        Staging => "https://staging.server.com/",
        Development => "https://development.server.com",
        Local => "https://10.0.1.1/",
        Edge => "edge.server.com",
    }
}

/// Host screen: shows what the app is connected to and counts clicks that
/// reached it.
struct DemoView {
    active: Option<Backend>,
    pending: Rc<RefCell<Option<Backend>>>,
    clicks: usize,
    last_click: Option<Point>,
    modal_answers: usize,
}

impl HostView for DemoView {
    fn draw(&self, buf: &mut CellBuffer) {
        let width = buf.width();
        let plain = CellStyle::default();
        let active = self.active.as_ref().map_or("(none)", Environment::identifier);
        let lines = [
            "EnvSwitch demo".to_string(),
            format!("Connected to: {active}"),
            match *self.pending.borrow() {
                Some(next) => format!("Next launch:  {}", next.identifier()),
                None => String::new(),
            },
            format!(
                "Host clicks:  {}{}",
                self.clicks,
                self.last_click
                    .map(|p| format!(" (last at {:.0},{:.0})", p.x - 0.5, p.y - 0.5))
                    .unwrap_or_default()
            ),
            format!("Host modals answered: {}", self.modal_answers),
            String::new(),
            "drag the trigger to move it | m: host modal | q: quit".to_string(),
        ];
        for (row, line) in (0u16..).zip(lines.iter()) {
            let style = if row == 0 { plain.bold() } else { plain };
            buf.put_str(2, row + 1, line, style, width.saturating_sub(2));
        }
    }

    fn on_click(&mut self, at: Point, _top: &mut TerminalPresenter) {
        self.clicks += 1;
        self.last_click = Some(at);
    }

    fn on_key(&mut self, key: Key, top: &mut TerminalPresenter) -> Flow {
        if key == Key::Char('m') && !top.has_active_presentation() {
            top.present(Surface {
                kind: SurfaceKind::Host,
                style: SurfaceStyle::Alert,
                title: "Host settings".into(),
                message: "The switcher stays inert while this is open".into(),
                items: vec![SurfaceItem::dismiss("Close")],
            });
        }
        Flow::Continue
    }

    fn on_modal_answer(&mut self, _title: &str, _response: SurfaceResponse) {
        self.modal_answers += 1;
    }
}

fn run() -> envswitch_term::Result<()> {
    let config = TermConfig::from_env(APP_NAME)?;
    envswitch_term::logging::init(&config)?;

    let store = Arc::new(FileStore::open(&config.state_file)?);
    let pending = Rc::new(RefCell::new(None));
    let on_select = {
        let pending = Rc::clone(&pending);
        move |backend: Backend| {
            tracing::info!(identifier = backend.identifier(), "backend selected");
            *pending.borrow_mut() = Some(backend);
        }
    };

    let controller = EnvironmentController::new(
        TerminalPresenter::new(0, 0),
        store,
        config.controller_config(ControllerConfig::default()),
        on_select,
    )?;
    let view = DemoView {
        active: controller.saved_variant(),
        pending,
        clicks: 0,
        last_click: None,
        modal_answers: 0,
    };

    let session = TerminalSession::new(SessionOptions::default())?;
    let (width, height) = session.size()?;
    let mut app = App::new(controller, view, width, height);
    app.run(&session)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("envswitch-demo: {e}");
        std::process::exit(1);
    }
}
