//! URI-addressed video capture and recording.
//!
//! Sources and sinks are addressed as `scheme:[key=value,...]//locator` and
//! built through scheme-keyed registries. Compositional schemes wrap another
//! source given as a nested URI in their locator, e.g.
//! `convert:[fmt=GRAY8]//test:[size=320x240]//`.

mod error;
pub use error::*;

mod pixelformat;
pub use pixelformat::*;

mod uri;
pub use uri::*;

mod source;
pub use source::*;

mod sink;
pub use sink::*;

mod registry;
pub use registry::*;

mod videoframe;
pub use videoframe::*;

mod videoinput;
pub use videoinput::*;

mod videooutput;
pub use videooutput::*;

mod stream;
pub use stream::*;

pub mod pixelconvert;
pub mod pvn;
pub mod videoin;
pub mod videoout;
