use std::time::Duration;

use crate::camera::ScreenOffset;
use crate::stream::descriptor::{
    AnimationDescriptor, Channel, ChannelValue, Easing, Segment, Tween,
};
use crate::stream::sample::Sample;

/// Segments run 50% longer than the sampling interval so consecutive
/// segments overlap and motion reads as continuous rather than stepped.
pub fn segment_duration(interval: Duration) -> u32 {
    (interval.as_millis() as f64 * 1.5).round() as u32
}

/// Build the position descriptor for one fix, with its rotation child
/// nested so both channels travel in a single update. A start segment
/// establishes the value without motion; a continue segment animates from
/// wherever the consumer currently is.
pub fn moving_descriptor(
    sample: &Sample,
    offset: ScreenOffset,
    is_start: bool,
    interval: Duration,
) -> AnimationDescriptor {
    let tween = Tween {
        duration_ms: segment_duration(interval),
        easing: Easing::Linear,
    };
    let position = ChannelValue::Position(offset);
    let rotation = ChannelValue::Rotation(sample.heading);

    let (position_segment, rotation_segment) = if is_start {
        (
            Segment::Start {
                current: position,
                target: position,
                tween,
            },
            Segment::Start {
                current: rotation,
                target: rotation,
                tween,
            },
        )
    } else {
        (
            Segment::Continue {
                target: position,
                tween,
            },
            Segment::Continue {
                target: rotation,
                tween,
            },
        )
    };

    AnimationDescriptor {
        channel: Channel::Position,
        segment: position_segment,
        children: vec![AnimationDescriptor {
            channel: Channel::Rotation,
            segment: rotation_segment,
            children: Vec::new(),
        }],
    }
}

/// Published when the camera moves mid-stream; the consumer freezes until
/// the next start segment arrives.
pub fn stop_descriptor() -> AnimationDescriptor {
    AnimationDescriptor {
        channel: Channel::Position,
        segment: Segment::Stop,
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sample {
        Sample {
            latitude: 45.0,
            longitude: 7.0,
            heading: 10.0,
        }
    }

    fn offset() -> ScreenOffset {
        ScreenOffset { x: 70.0, y: 450.0 }
    }

    #[test]
    fn duration_is_half_again_the_interval() {
        assert_eq!(segment_duration(Duration::from_millis(600)), 900);
        assert_eq!(segment_duration(Duration::from_millis(333)), 500);
    }

    #[test]
    fn start_descriptor_snaps_to_current() {
        let descriptor = moving_descriptor(&sample(), offset(), true, Duration::from_millis(600));

        assert_eq!(descriptor.channel, Channel::Position);
        let Segment::Start {
            current,
            target,
            tween,
        } = descriptor.segment
        else {
            panic!("expected a start segment");
        };
        assert_eq!(current, target);
        assert_eq!(current, ChannelValue::Position(offset()));
        assert_eq!(tween.duration_ms, 900);
        assert_eq!(tween.easing, Easing::Linear);

        let child = descriptor.rotation_child().expect("rotation child");
        assert!(matches!(
            child.segment,
            Segment::Start {
                current: ChannelValue::Rotation(h),
                target: ChannelValue::Rotation(t),
                ..
            } if h == 10.0 && t == 10.0
        ));
    }

    #[test]
    fn continue_descriptor_only_carries_a_target() {
        let descriptor = moving_descriptor(&sample(), offset(), false, Duration::from_millis(600));

        assert!(matches!(
            descriptor.segment,
            Segment::Continue {
                target: ChannelValue::Position(_),
                ..
            }
        ));
        assert_eq!(descriptor.children.len(), 1);
        assert!(matches!(
            descriptor.rotation_child().unwrap().segment,
            Segment::Continue {
                target: ChannelValue::Rotation(h),
                ..
            } if h == 10.0
        ));
    }

    #[test]
    fn stop_descriptor_has_no_target_and_no_children() {
        let descriptor = stop_descriptor();
        assert!(descriptor.is_stop());
        assert_eq!(descriptor.channel, Channel::Position);
        assert!(descriptor.children.is_empty());
    }
}
