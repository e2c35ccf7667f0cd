//! Gameplay constants and tuning defaults.
//!
//! Distances are in centimetres, times in seconds, angles in degrees.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Character ---

/// Maximum number of weapons the character can carry.
pub const INVENTORY_CAPACITY: usize = 6;

/// Interpolation destinations: the weapon target plus six holster targets.
pub const INTERP_LOCATION_COUNT: usize = 7;

/// Rounds of 9mm carried at spawn.
pub const STARTING_9MM_AMMO: u32 = 85;

/// Rounds of rifle ammo carried at spawn.
pub const STARTING_AR_AMMO: u32 = 120;

pub const CHARACTER_MAX_HEALTH: f32 = 100.0;

/// How long the "firing" crosshair flag stays set after each shot.
pub const SHOOT_TIME_DURATION: f64 = 0.05;

/// Minimum pickup/equip sound spacing.
pub const PICKUP_SOUND_RESET_TIME: f64 = 0.2;
pub const EQUIP_SOUND_RESET_TIME: f64 = 0.2;

/// Shortest delay an auto-fire timer may be armed with.
pub const MIN_AUTO_FIRE_RATE: f64 = 0.01;

// --- Camera and look ---

pub const CAMERA_DEFAULT_FOV: f32 = 90.0;
pub const CAMERA_ZOOMED_FOV: f32 = 25.0;
pub const ZOOM_INTERP_SPEED: f32 = 20.0;

pub const HIP_TURN_RATE: f32 = 90.0;
pub const HIP_LOOK_UP_RATE: f32 = 90.0;
pub const AIMING_TURN_RATE: f32 = 20.0;
pub const AIMING_LOOK_UP_RATE: f32 = 20.0;

pub const MOUSE_HIP_SCALE: f32 = 1.0;
pub const MOUSE_AIMING_SCALE: f32 = 0.6;

/// Spring arm length behind the character.
pub const CAMERA_BOOM_LENGTH: f32 = 240.0;

/// Camera offset at the end of the spring arm (forward, right, up).
pub const CAMERA_SOCKET_OFFSET: [f32; 3] = [0.0, 50.0, 70.0];

/// Distance in front of the camera the weapon interpolates to.
pub const CAMERA_INTERP_DISTANCE: f32 = 250.0;

/// Height above the camera the weapon interpolates to.
pub const CAMERA_INTERP_ELEVATION: f32 = 65.0;

// --- Movement ---

pub const BASE_MOVEMENT_SPEED: f32 = 650.0;
pub const CROUCH_MOVEMENT_SPEED: f32 = 300.0;
pub const BASE_GROUND_FRICTION: f32 = 2.0;
pub const CROUCH_GROUND_FRICTION: f32 = 100.0;
pub const JUMP_Z_VELOCITY: f32 = 600.0;
pub const GRAVITY_Z: f32 = -980.0;

pub const STANDING_CAPSULE_HALF_HEIGHT: f32 = 88.0;
pub const CROUCHING_CAPSULE_HALF_HEIGHT: f32 = 44.0;
pub const CAPSULE_INTERP_SPEED: f32 = 20.0;
pub const CAPSULE_RADIUS: f32 = 42.0;

/// Depth of the downward surface probe.
pub const SURFACE_TRACE_DEPTH: f32 = 400.0;

// --- Crosshair ---

pub const CROSSHAIR_BASE_SPREAD: f32 = 0.5;
pub const CROSSHAIR_IN_AIR_TARGET: f32 = 2.25;
pub const CROSSHAIR_IN_AIR_SPEED: f32 = 2.25;
pub const CROSSHAIR_LANDED_SPEED: f32 = 30.0;
pub const CROSSHAIR_AIM_TARGET: f32 = -0.5;
pub const CROSSHAIR_AIM_SPEED: f32 = 30.0;
pub const CROSSHAIR_SHOOTING_TARGET: f32 = 0.3;
pub const CROSSHAIR_SHOOTING_SPEED: f32 = 60.0;

// --- Ballistics ---

/// Length of the crosshair ray.
pub const CROSSHAIR_TRACE_LENGTH: f32 = 50_000.0;

/// The muzzle ray extends this far past the crosshair target.
pub const MUZZLE_TRACE_EXTENSION: f32 = 1.25;

// --- Items ---

/// Duration of the pickup interpolation curve.
pub const Z_CURVE_TIME: f64 = 0.7;

/// Horizontal interpolation speed toward the destination.
pub const ITEM_INTERP_SPEED: f32 = 30.0;

/// Period of the idle glow pulse.
pub const PULSE_CURVE_TIME: f64 = 5.0;

pub const GLOW_AMOUNT: f32 = 150.0;
pub const FRESNEL_EXPONENT: f32 = 3.0;
pub const FRESNEL_REFLECT_FRACTION: f32 = 4.0;

/// Radius of an item's pickup trigger.
pub const ITEM_AREA_RADIUS: f32 = 150.0;

/// Radius of an item's trace collision box.
pub const ITEM_COLLISION_RADIUS: f32 = 30.0;

/// Radius of an ammo pickup's auto-collect sphere.
pub const AMMO_COLLECT_RADIUS: f32 = 50.0;

// --- Weapons ---

pub const THROW_WEAPON_TIME: f64 = 0.7;
pub const THROW_IMPULSE: f32 = 20_000.0;
pub const THROW_ROLL_DEGREES: f32 = -20.0;
pub const THROW_YAW_DEGREES: f32 = 30.0;

pub const SLIDE_DISPLACEMENT_TIME: f64 = 0.2;
pub const MAX_SLIDE_DISPLACEMENT: f32 = 4.0;
pub const MAX_RECOIL_ROTATION: f32 = 20.0;

pub const DEFAULT_WEAPON_AMMO: u32 = 30;
pub const DEFAULT_MAGAZINE_CAPACITY: u32 = 30;
pub const DEFAULT_AUTO_FIRE_RATE: f64 = 0.1;
pub const DEFAULT_WEAPON_DAMAGE: f32 = 20.0;
pub const DEFAULT_HEADSHOT_DAMAGE: f32 = 50.0;

/// Hand socket offset relative to the character (forward, right, up).
pub const HAND_SOCKET_OFFSET: [f32; 3] = [30.0, 20.0, 40.0];

// --- Enemies ---

pub const ENEMY_MAX_HEALTH: f32 = 100.0;
pub const ENEMY_STUN_CHANCE: f32 = 0.5;
pub const ENEMY_BASE_DAMAGE: f32 = 40.0;
pub const ENEMY_ATTACK_WAIT_TIME: f64 = 1.0;
pub const ENEMY_HEALTH_BAR_DISPLAY_TIME: f64 = 4.0;
pub const ENEMY_HIT_REACT_MIN: f64 = 0.5;
pub const ENEMY_HIT_REACT_MAX: f64 = 1.5;
pub const ENEMY_DEATH_TIME: f64 = 4.0;
pub const HIT_NUMBER_DESTROY_TIME: f64 = 1.5;
pub const ENEMY_AGRO_RADIUS: f32 = 600.0;
pub const ENEMY_COMBAT_RANGE: f32 = 150.0;
pub const ENEMY_WEAPON_REACH: f32 = 120.0;
pub const ENEMY_BODY_RADIUS: f32 = 45.0;
pub const ENEMY_HEAD_RADIUS: f32 = 18.0;
/// Head sphere height above the enemy capsule centre.
pub const ENEMY_HEAD_HEIGHT: f32 = 70.0;

/// Bone name enemies designate as the head.
pub const HEAD_BONE: &str = "head";

/// Bone name reported for non-head enemy hits.
pub const BODY_BONE: &str = "spine_02";

// --- Explosives ---

pub const EXPLOSIVE_DAMAGE: f32 = 60.0;
pub const EXPLOSIVE_RADIUS: f32 = 300.0;
pub const EXPLOSIVE_COLLISION_RADIUS: f32 = 40.0;

// --- Asset names ---

pub const RIGHT_HAND_SOCKET: &str = "RightHandSocket";
pub const LEFT_HAND_BONE: &str = "hand_l";
pub const START_FIRE_SECTION: &str = "StartFire";
pub const EQUIP_SECTION: &str = "Equip";
pub const HIT_REACT_SECTION: &str = "HitReactFront";
pub const DEATH_SECTION: &str = "DeathA";
pub const MELEE_IMPACT_SOUND: &str = "MeleeImpact";
pub const BLOOD_PARTICLES: &str = "BloodImpact";
pub const IMPACT_PARTICLES: &str = "BulletImpact";
pub const BEAM_PARTICLES: &str = "SmokeBeam";
