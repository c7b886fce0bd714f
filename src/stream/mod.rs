mod builder;
mod descriptor;
mod error;
mod sample;
mod source;
mod stream;

pub use descriptor::{AnimationDescriptor, Channel, ChannelValue, Easing, Segment, Tween};
pub use error::StreamError;
pub use sample::Sample;
pub use source::SampleSource;
pub use stream::{MarkerStream, StreamPhase};
