use serde::Serialize;

use crate::camera::ScreenOffset;

/// Which animatable a segment drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    Position,
    Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Easing {
    Linear,
}

/// Interpolation window for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tween {
    pub duration_ms: u32,
    pub easing: Easing,
}

/// A value on one of the two animation channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ChannelValue {
    Position(ScreenOffset),
    Rotation(f32),
}

/// One animation instruction for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Segment {
    /// Initialize the animatable at `current` before any motion. On the
    /// first frame current and target coincide, so the marker snaps into
    /// place and animates from the next sample on.
    Start {
        current: ChannelValue,
        target: ChannelValue,
        tween: Tween,
    },
    /// Animate from whatever the consumer currently shows toward `target`.
    Continue { target: ChannelValue, tween: Tween },
    /// Halt interpolation. Carries no target and no tween.
    Stop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationDescriptor {
    pub channel: Channel,
    pub segment: Segment,
    /// Nested descriptors delivered atomically with this one. A position
    /// update always carries its rotation child here.
    pub children: Vec<AnimationDescriptor>,
}

impl AnimationDescriptor {
    pub fn is_stop(&self) -> bool {
        matches!(self.segment, Segment::Stop)
    }

    pub fn rotation_child(&self) -> Option<&AnimationDescriptor> {
        self.children.iter().find(|c| c.channel == Channel::Rotation)
    }
}
