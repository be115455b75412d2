//! View and event coordination core for an embeddable node-link diagram editor.
//!
//! The host owns the drawing surface and forwards raw pointer input. This
//! crate turns that input into semantic diagram events, keeps the pan/zoom
//! transform between screen, world and minimap space, maintains selection and
//! hover, and tells the host's renderer when to draw.
//!
//! ```text
//! host pointer ─▶ PointerInput ─▶ bus (Screen*) ─▶ ViewManager
//!                                                     │
//!                      bus (World* / Minimap* / RenderRequested)
//!                                                     ▼
//!                                  DiagramStore, RenderDispatcher ─▶ Renderer
//! ```
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`diagram`] | [`diagram::Diagram`] facade wiring all components |
//! | [`bus`] | Synchronous, re-entrant publish/subscribe |
//! | [`event`] | [`event::DiagramEvent`] variants and their [`event::EventKind`] tags |
//! | [`view`] | [`view::ViewState`], coordinate transforms, minimap bounds |
//! | [`view_manager`] | Raw-to-semantic routing, pan and zoom |
//! | [`store`] | Diagram state store: selection, hover, node dragging |
//! | [`model`] | Nodes, links, categories and interaction state |
//! | [`hit`] | World-space hit-testing |
//! | [`minimap`] | Minimap ↔ world projection |
//! | [`render`] | [`render::Renderer`] trait and frame dispatch |
//! | [`input`] | Pointer adapter producing raw events |
//! | [`geom`] | Position types for each coordinate space |
//! | [`theme`] | Theme configuration and validation |
//! | [`consts`] | Shared numeric constants (zoom limits, tolerances) |

pub mod bus;
pub mod consts;
pub mod diagram;
pub mod event;
pub mod geom;
pub mod hit;
pub mod input;
pub mod minimap;
pub mod model;
pub mod render;
pub mod store;
pub mod theme;
pub mod view;
pub mod view_manager;

pub use bus::{EventBus, SubscriptionId};
pub use diagram::{Diagram, DiagramError};
pub use event::{DiagramEvent, EventKind};
pub use geom::{AreaSize, DragPositions, MinimapPosition, Point, ScreenPosition, UnpannedPosition, WorldPosition};
pub use render::{Frame, Renderer};
pub use theme::{Theme, ThemeError};
pub use view::ViewState;
