//! Light sources and the light rig.
//!
//! A [`Light`] is a colour, an intensity and a [`LightKind`] describing its
//! placement. Placement is fixed at construction; only the intensity can be
//! changed afterwards, through [`Light::set_intensity`].
//!
//! The [`LightRig`] installs one light per [`LightSlot`] into the scene using
//! the documented defaults below, overridden by [`crate::config::LightsConfig`].
//!
//! | slot        | colour                          | intensity | placement                                  |
//! |-------------|---------------------------------|-----------|--------------------------------------------|
//! | ambient     | `0xffffff`                      | 1.5       |                                            |
//! | hemisphere  | sky `0xff0000`, ground `0x0000ff` | 0.9     | up axis +Y                                 |
//! | directional | `0x00fffc`                      | 0.9       | (1, 0.25, 0) towards the origin            |
//! | point       | `0xffffff`                      | 50        | (2, 3, 4), no cutoff, decay 2              |
//! | rect area   | `0x4e00ff`                      | 6         | 1x1 at (-1.5, 0, 1.5) facing the origin    |
//! | spot        | `0x78ff00`                      | 4.5       | (0, 2, 3) towards (-0.75, 0, 0), cutoff 10, angle pi/10, penumbra 0.25, decay 1 |

use cgmath::{InnerSpace, Point3, Rad, Vector3};

use crate::{
    config::LightsConfig,
    data_structures::scene_graph::{LightId, Scene},
    panel::ControlRange,
};

/// Converts a `0xRRGGBB` sRGB colour into linear RGB.
pub fn srgb_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Sky colour (the light's colour) from above, ground colour from below.
    Hemisphere { ground_color: [f32; 3] },
    Directional {
        position: Point3<f32>,
        target: Point3<f32>,
    },
    /// `distance == 0` means no cutoff.
    Point {
        position: Point3<f32>,
        distance: f32,
        decay: f32,
    },
    /// A one-sided emitting rectangle facing `target`.
    RectArea {
        position: Point3<f32>,
        target: Point3<f32>,
        width: f32,
        height: f32,
    },
    Spot {
        position: Point3<f32>,
        target: Point3<f32>,
        distance: f32,
        angle: Rad<f32>,
        penumbra: f32,
        decay: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub name: String,
    pub color: [f32; 3],
    pub kind: LightKind,
    intensity: f32,
}

impl Light {
    pub fn new(name: &str, color: [f32; 3], intensity: f32, kind: LightKind) -> Self {
        let mut light = Self {
            name: name.to_string(),
            color,
            kind,
            intensity: 0.0,
        };
        light.set_intensity(intensity);
        light
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets the intensity, clamping negative and NaN values to zero.
    /// Returns the stored value.
    pub fn set_intensity(&mut self, intensity: f32) -> f32 {
        self.intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.max(0.0)
        };
        self.intensity
    }

    pub fn position(&self) -> Option<Point3<f32>> {
        match self.kind {
            LightKind::Ambient | LightKind::Hemisphere { .. } => None,
            LightKind::Directional { position, .. }
            | LightKind::Point { position, .. }
            | LightKind::RectArea { position, .. }
            | LightKind::Spot { position, .. } => Some(position),
        }
    }

    /// Unit vector the light points along (from its position towards its target).
    pub fn direction(&self) -> Option<Vector3<f32>> {
        match self.kind {
            LightKind::Directional { position, target }
            | LightKind::RectArea {
                position, target, ..
            }
            | LightKind::Spot {
                position, target, ..
            } => {
                let dir = target - position;
                if dir.magnitude2() > f32::EPSILON {
                    Some(dir.normalize())
                } else {
                    Some(-Vector3::unit_y())
                }
            }
            _ => None,
        }
    }
}

/// The six light types the viewer ships with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightSlot {
    Ambient,
    Hemisphere,
    Directional,
    Point,
    RectArea,
    Spot,
}

impl LightSlot {
    pub const ALL: [LightSlot; 6] = [
        LightSlot::Ambient,
        LightSlot::Hemisphere,
        LightSlot::Directional,
        LightSlot::Point,
        LightSlot::RectArea,
        LightSlot::Spot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LightSlot::Ambient => "ambient",
            LightSlot::Hemisphere => "hemisphere",
            LightSlot::Directional => "directional",
            LightSlot::Point => "point",
            LightSlot::RectArea => "rect area",
            LightSlot::Spot => "spot",
        }
    }

    /// Default light for the slot with the given intensity.
    pub fn build(&self, intensity: f32) -> Light {
        let origin = Point3::new(0.0, 0.0, 0.0);
        let (color, kind) = match self {
            LightSlot::Ambient => (srgb_hex(0xffffff), LightKind::Ambient),
            LightSlot::Hemisphere => (
                srgb_hex(0xff0000),
                LightKind::Hemisphere {
                    ground_color: srgb_hex(0x0000ff),
                },
            ),
            LightSlot::Directional => (
                srgb_hex(0x00fffc),
                LightKind::Directional {
                    position: Point3::new(1.0, 0.25, 0.0),
                    target: origin,
                },
            ),
            LightSlot::Point => (
                srgb_hex(0xffffff),
                LightKind::Point {
                    position: Point3::new(2.0, 3.0, 4.0),
                    distance: 0.0,
                    decay: 2.0,
                },
            ),
            LightSlot::RectArea => (
                srgb_hex(0x4e00ff),
                LightKind::RectArea {
                    position: Point3::new(-1.5, 0.0, 1.5),
                    target: origin,
                    width: 1.0,
                    height: 1.0,
                },
            ),
            LightSlot::Spot => (
                srgb_hex(0x78ff00),
                LightKind::Spot {
                    position: Point3::new(0.0, 2.0, 3.0),
                    target: Point3::new(-0.75, 0.0, 0.0),
                    distance: 10.0,
                    angle: Rad(std::f32::consts::PI * 0.1),
                    penumbra: 0.25,
                    decay: 1.0,
                },
            ),
        };
        Light::new(self.label(), color, intensity, kind)
    }
}

/// Handles of the lights installed into a scene, in slot order.
#[derive(Clone, Debug, Default)]
pub struct LightRig {
    installed: Vec<(LightSlot, LightId)>,
}

impl LightRig {
    /// Adds every enabled light to `scene`. Configured intensities are clamped
    /// to the slot's panel range.
    pub fn install(scene: &mut Scene, config: &LightsConfig) -> Self {
        let installed = LightSlot::ALL
            .iter()
            .filter_map(|slot| {
                let setting = config.setting(*slot);
                if !setting.enabled {
                    log::debug!("{} light disabled", slot.label());
                    return None;
                }
                let range = ControlRange::for_slot(*slot);
                let intensity = range.clamp(setting.intensity);
                if intensity != setting.intensity {
                    log::warn!(
                        "{} intensity {} is outside {}..{}, using {}",
                        slot.label(),
                        setting.intensity,
                        range.min,
                        range.max,
                        intensity
                    );
                }
                let id = scene.add_light(slot.build(intensity));
                Some((*slot, id))
            })
            .collect();
        Self { installed }
    }

    pub fn id(&self, slot: LightSlot) -> Option<LightId> {
        self.installed
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightSlot, LightId)> + '_ {
        self.installed.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }
}
