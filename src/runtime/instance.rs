use std::sync::Arc;

use smallvec::SmallVec;

use crate::assets::MotionData;
use crate::runtime::event::{HandlerSet, MotionEvent, SharedEventHandler};
use crate::runtime::params::{LoopCount, PlayMode, PlaybackParams};

/// Weight envelope of an instance.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Fade {
    /// Full weight, no fade running.
    Steady,
    In { elapsed: f32, duration: f32 },
    Out { from: f32, elapsed: f32, duration: f32 },
}

pub(crate) type InstanceEvents = SmallVec<[MotionEvent; 2]>;

/// One playing occurrence of a motion, owned by the runtime arena.
#[derive(Clone)]
pub struct MotionInstance {
    data: Arc<MotionData>,

    pub time: f32,
    pub play_speed: f32,
    pub weight: f32,
    pub max_loops: LoopCount,
    pub play_mode: PlayMode,
    pub retarget: bool,
    pub mirror: bool,
    pub in_place: bool,
    pub mix: bool,
    pub freeze_at_last_frame: bool,
    pub delete_on_zero_weight: bool,
    pub blend_out_time: f32,
    pub paused: bool,

    loops_completed: u32,
    started: bool,
    finished: bool,
    stopping: bool,
    fade: Fade,

    pub(crate) handlers: HandlerSet,
}

impl MotionInstance {
    #[must_use]
    pub fn new(data: Arc<MotionData>, params: &PlaybackParams) -> Self {
        let duration = data.duration;
        let time = match params.play_mode {
            PlayMode::Forward => 0.0,
            PlayMode::Backward => duration,
        };
        let (weight, fade) = if params.blend_in_time > 0.0 {
            (
                0.0,
                Fade::In {
                    elapsed: 0.0,
                    duration: params.blend_in_time,
                },
            )
        } else {
            (1.0, Fade::Steady)
        };

        Self {
            data,
            time,
            play_speed: params.play_speed,
            weight,
            max_loops: params.max_loops,
            play_mode: params.play_mode,
            retarget: params.retarget,
            mirror: params.mirror,
            in_place: params.in_place,
            mix: params.mix,
            freeze_at_last_frame: params.freeze_at_last_frame,
            delete_on_zero_weight: params.delete_on_zero_weight,
            blend_out_time: params.blend_out_time,
            paused: !params.play_now,
            loops_completed: 0,
            started: false,
            finished: false,
            stopping: false,
            fade,
            handlers: HandlerSet::new(),
        }
    }

    #[must_use]
    pub fn data(&self) -> &Arc<MotionData> {
        &self.data
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.data.duration
    }

    #[must_use]
    pub fn normalized_time(&self) -> f32 {
        let duration = self.duration();
        if duration > 0.0 {
            (self.time / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn loops_completed(&self) -> u32 {
        self.loops_completed
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn is_stopping(&self) -> bool {
        self.stopping
    }

    /// True while a blend-in or blend-out fade is running.
    #[must_use]
    pub fn is_blending(&self) -> bool {
        !matches!(self.fade, Fade::Steady)
    }

    /// Whether the runtime should drop this instance.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.delete_on_zero_weight && self.weight <= 0.0 && !matches!(self.fade, Fade::In { .. })
    }

    pub fn set_current_time(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.duration().max(0.0));
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode = mode;
    }

    /// Fades the instance to zero weight over `fade` seconds.
    pub fn stop(&mut self, fade: f32) {
        self.stopping = true;
        if fade > 0.0 && self.weight > 0.0 {
            self.fade = Fade::Out {
                from: self.weight,
                elapsed: 0.0,
                duration: fade,
            };
        } else {
            self.weight = 0.0;
            self.fade = Fade::Steady;
        }
    }

    pub fn add_handler(&mut self, handler: SharedEventHandler) -> bool {
        self.handlers.insert(handler)
    }

    pub fn remove_handler(&mut self, handler: &SharedEventHandler) -> bool {
        self.handlers.remove(handler)
    }

    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Advances time and weight, returning the events raised this step.
    pub(crate) fn update(&mut self, dt: f32) -> InstanceEvents {
        let mut events = InstanceEvents::new();
        if self.paused {
            return events;
        }

        let was_stopping_with_weight = self.stopping && self.weight > 0.0;
        self.advance_fade(dt);
        if was_stopping_with_weight && self.weight <= 0.0 {
            events.push(MotionEvent::Stopped);
        }
        if self.stopping && self.weight <= 0.0 {
            return events;
        }

        if !self.started {
            self.started = true;
            events.push(MotionEvent::Started);
        }
        if !self.finished {
            self.advance_time(dt, &mut events);
        }
        events
    }

    fn advance_fade(&mut self, dt: f32) {
        self.fade = match self.fade {
            Fade::Steady => Fade::Steady,
            Fade::In { elapsed, duration } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.weight = 1.0;
                    Fade::Steady
                } else {
                    self.weight = elapsed / duration;
                    Fade::In { elapsed, duration }
                }
            }
            Fade::Out {
                from,
                elapsed,
                duration,
            } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.weight = 0.0;
                    Fade::Steady
                } else {
                    self.weight = from * (1.0 - elapsed / duration);
                    Fade::Out {
                        from,
                        elapsed,
                        duration,
                    }
                }
            }
        };
    }

    fn advance_time(&mut self, dt: f32, events: &mut InstanceEvents) {
        let duration = self.duration();
        if duration <= 0.0 {
            if self.max_loops != LoopCount::Forever {
                self.finish(events);
            }
            return;
        }

        // Non-positive speed holds the current frame.
        let step = dt * self.play_speed.max(0.0);
        let (raw, wrapped) = match self.play_mode {
            PlayMode::Forward => {
                let t = self.time + step;
                (t, t >= duration)
            }
            PlayMode::Backward => {
                let t = self.time - step;
                (t, t <= 0.0)
            }
        };
        if !wrapped {
            self.time = raw;
            return;
        }

        // A large step may cross several boundaries; they collapse into one
        // event carrying the final count.
        let crossed = match self.play_mode {
            PlayMode::Forward => (raw / duration).floor(),
            PlayMode::Backward => (-raw / duration).floor() + 1.0,
        }
        .max(1.0) as u32;
        let previous = self.loops_completed;
        let reached = previous.saturating_add(crossed);

        let limit = match self.max_loops {
            LoopCount::Forever => None,
            LoopCount::Times(n) => Some(n.max(1)),
        };
        if let Some(n) = limit
            && reached >= n
        {
            if n - 1 > previous {
                events.push(MotionEvent::Looped { count: n - 1 });
            }
            self.loops_completed = n;
            self.time = match self.play_mode {
                PlayMode::Forward => duration,
                PlayMode::Backward => 0.0,
            };
            self.finish(events);
        } else {
            self.loops_completed = reached;
            events.push(MotionEvent::Looped { count: reached });
            let t = raw.rem_euclid(duration);
            self.time = if self.play_mode == PlayMode::Backward && t <= 0.0 {
                duration
            } else {
                t
            };
        }
    }

    fn finish(&mut self, events: &mut InstanceEvents) {
        self.finished = true;
        events.push(MotionEvent::Ended);
        if !self.freeze_at_last_frame && !self.stopping {
            self.stop(self.blend_out_time);
        }
    }
}

impl std::fmt::Debug for MotionInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionInstance")
            .field("motion", &self.data.name)
            .field("time", &self.time)
            .field("weight", &self.weight)
            .field("loops_completed", &self.loops_completed)
            .field("finished", &self.finished)
            .field("stopping", &self.stopping)
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}
