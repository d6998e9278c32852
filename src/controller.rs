//! Shared handle wiring a [`CanvasSession`] to Slint callbacks.
//!
//! UI callbacks must be `'static` closures, so the session lives behind
//! `Rc<RefCell<..>>` and [`CanvasController`] is cheap to clone into each
//! one. Every callback re-syncs the bound [`CanvasModels`] after the event.
//!
//! # Example
//!
//! ```ignore
//! use workflow_canvas::{CanvasConfig, CanvasController, CanvasModels, EdgeRow, NodeRow};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!
//!     // Rows are converted into the structs declared in the .slint file
//!     let models = CanvasModels::with_rows(
//!         |n: &NodeRow| ComponentData { id: n.id, title: n.name.clone(), x: n.screen_x, y: n.screen_y },
//!         |e: &EdgeRow| ConnectionData { from_node: e.source_node, to_node: e.target_node },
//!     );
//!     let ctrl = CanvasController::with_models(CanvasConfig::default(), models);
//!
//!     window.set_components(ctrl.models().nodes());
//!     window.set_connections(ctrl.models().edges());
//!     window.set_errors(ctrl.models().messages());
//!
//!     window.on_library_pressed(ctrl.library_drag_callback());
//!     window.on_canvas_drop(ctrl.drop_callback());
//!     window.on_node_pressed(ctrl.node_pressed_callback());
//!     window.on_canvas_pressed(ctrl.canvas_pressed_callback());
//!     window.on_pointer_moved(ctrl.pointer_move_callback());
//!     window.on_pointer_released(ctrl.pointer_up_callback());
//!     window.on_output_clicked(ctrl.output_slot_callback());
//!     window.on_input_clicked(ctrl.input_slot_callback());
//!
//!     window.on_toggle_connect({
//!         let ctrl = ctrl.clone();
//!         move || ctrl.toggle_connect_mode()
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::config::CanvasConfig;
use crate::error::{CanvasError, EndpointFault, Result};
use crate::graph::{EdgeId, Endpoint, NodeId};
use crate::models::{CanvasModels, EdgeRow, NodeRow};
use crate::session::{CanvasSession, CanvasStatus, Outcome};
use crate::viewport::Point;
use log::warn;
use slint::SharedString;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Clone this controller to share it across callbacks.
///
/// `N` and `E` are the row types of the bound [`CanvasModels`].
pub struct CanvasController<N = NodeRow, E = EdgeRow> {
    session: Rc<RefCell<CanvasSession>>,
    models: CanvasModels<N, E>,
}

impl<N, E> Clone for CanvasController<N, E> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            models: self.models.clone(),
        }
    }
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self::from_session(CanvasSession::with_config(config), CanvasModels::new())
    }
}

impl<N, E> CanvasController<N, E>
where
    N: Clone + PartialEq + 'static,
    E: Clone + PartialEq + 'static,
{
    /// Controller syncing into `models`, typically built with
    /// [`CanvasModels::with_rows`].
    pub fn with_models(config: CanvasConfig, models: CanvasModels<N, E>) -> Self {
        Self::from_session(CanvasSession::with_config(config), models)
    }

    pub fn from_session(session: CanvasSession, models: CanvasModels<N, E>) -> Self {
        models.sync(&session);
        Self {
            session: Rc::new(RefCell::new(session)),
            models,
        }
    }

    /// Borrow the session for reading.
    ///
    /// Don't hold the borrow across a call that mutates the session.
    pub fn session(&self) -> Ref<'_, CanvasSession> {
        self.session.borrow()
    }

    pub fn models(&self) -> &CanvasModels<N, E> {
        &self.models
    }

    pub fn status(&self) -> CanvasStatus {
        self.session.borrow().status()
    }

    /// Run `f` against the session, then sync the models.
    pub fn update<R>(&self, f: impl FnOnce(&mut CanvasSession) -> R) -> R {
        let mut session = self.session.borrow_mut();
        let result = f(&mut *session);
        self.models.sync(&*session);
        result
    }

    // === Toolbar ===

    pub fn toggle_connect_mode(&self) -> bool {
        self.update(|s| s.toggle_connect_mode())
    }

    pub fn toggle_grid(&self) -> bool {
        self.update(|s| s.toggle_grid())
    }

    pub fn zoom_in(&self) -> f32 {
        self.update(|s| s.zoom_in())
    }

    pub fn zoom_out(&self) -> f32 {
        self.update(|s| s.zoom_out())
    }

    pub fn reset_zoom(&self) -> f32 {
        self.update(|s| s.reset_zoom())
    }

    pub fn clear(&self) -> Outcome {
        self.update(|s| s.clear())
    }

    pub fn delete_selected(&self) -> Outcome {
        self.update(|s| s.delete_selected())
    }

    /// Re-run validation and return whether the workflow is valid.
    pub fn validate(&self) -> bool {
        self.update(|s| s.validate().is_valid())
    }

    // === Callback factories ===
    //
    // Rejected events are logged by the session; the callbacks only keep the
    // models current.

    /// Returns a callback for a library item press: `(type_name)`.
    pub fn library_drag_callback(&self) -> impl Fn(SharedString) + 'static {
        let ctrl = self.clone();
        move |type_name| {
            let _ = ctrl.update(|s| s.begin_library_drag(type_name.as_str()));
        }
    }

    /// Returns a callback for a drop: `(x, y, over_canvas)` in screen pixels.
    pub fn drop_callback(&self) -> impl Fn(f32, f32, bool) + 'static {
        let ctrl = self.clone();
        move |x, y, over_canvas| {
            let _ = ctrl.update(|s| s.drop_on_canvas(Point::new(x, y), over_canvas));
        }
    }

    /// Returns a callback for a press on a node body: `(node_id, x, y)`.
    pub fn node_pressed_callback(&self) -> impl Fn(i32, f32, f32) + 'static {
        let ctrl = self.clone();
        move |id, x, y| {
            let _ = ctrl.pointer_down_on_node(id, Point::new(x, y));
        }
    }

    /// Returns a callback for a press on empty canvas: `(x, y)`.
    pub fn canvas_pressed_callback(&self) -> impl Fn(f32, f32) + 'static {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.update(|s| {
                s.clear_selection();
                s.pointer_down_on_canvas(Point::new(x, y))
            });
        }
    }

    pub fn pointer_move_callback(&self) -> impl Fn(f32, f32) + 'static {
        let ctrl = self.clone();
        move |x, y| {
            let _ = ctrl.update(|s| s.pointer_move(Point::new(x, y)));
        }
    }

    pub fn pointer_up_callback(&self) -> impl Fn() + 'static {
        let ctrl = self.clone();
        move || {
            ctrl.update(|s| s.pointer_up());
        }
    }

    /// Returns a callback for an output slot click: `(node_id, slot)`.
    pub fn output_slot_callback(&self) -> impl Fn(i32, i32) + 'static {
        let ctrl = self.clone();
        move |id, slot| {
            let _ = ctrl.click_slot(id, slot, true);
        }
    }

    /// Returns a callback for an input slot click: `(node_id, slot)`.
    pub fn input_slot_callback(&self) -> impl Fn(i32, i32) + 'static {
        let ctrl = self.clone();
        move |id, slot| {
            let _ = ctrl.click_slot(id, slot, false);
        }
    }

    /// Returns a callback deleting one node: `(node_id)`.
    pub fn delete_node_callback(&self) -> impl Fn(i32) + 'static {
        let ctrl = self.clone();
        move |id| {
            let _ = ctrl.update(|s| s.delete_node(node_id(id)));
        }
    }

    /// Returns a callback deleting one connection: `(edge_id)`.
    pub fn delete_edge_callback(&self) -> impl Fn(i32) + 'static {
        let ctrl = self.clone();
        move |id| {
            let edge = EdgeId(u64::try_from(id).unwrap_or(0));
            let _ = ctrl.update(|s| s.delete_edge(edge));
        }
    }

    // === Event handlers ===

    pub fn pointer_down_on_node(&self, id: i32, screen: Point) -> Result<Outcome> {
        self.update(|s| s.pointer_down_on_node(node_id(id), screen))
    }

    /// Forward a slot click. Negative slot indices are refused here and never
    /// reach the session.
    pub fn click_slot(&self, id: i32, slot: i32, output: bool) -> Result<Outcome> {
        let Ok(slot) = usize::try_from(slot) else {
            let err = CanvasError::InvalidEndpoint {
                endpoint: Endpoint::new(node_id(id), 0),
                reason: EndpointFault::NegativeSlot { slot },
            };
            warn!("{}", err);
            return Err(err);
        };
        self.update(|s| {
            if output {
                s.click_output_slot(node_id(id), slot)
            } else {
                s.click_input_slot(node_id(id), slot)
            }
        })
    }
}

/// Slint ids are `i32`; negative ids never name a node.
fn node_id(id: i32) -> NodeId {
    NodeId(u64::try_from(id).unwrap_or(0))
}
