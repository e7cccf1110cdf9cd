// Configuration file, all measurements in scene units (1 unit ~ 1 meter)
// This controls the initial generation parameter settings

pub const INITIAL_SEED: u64 = 4731160300984836911;

// Window pane sampling ranges
pub const WINDOW_WIDTH_MIN: f32 = 2.0;
pub const WINDOW_WIDTH_MAX: f32 = 6.0;
pub const WINDOW_HEIGHT_MIN: f32 = 4.0;
pub const WINDOW_HEIGHT_MAX: f32 = 10.0;

// Gutter is tied to window scale so it never dwarfs the panes:
// gutter = mean(window dims) * (GUTTER_SCALE * U), U in [0,1)
pub const GUTTER_SCALE: f32 = 0.5;

// Desired facade widths before room derivation
pub const DESIRED_WIDTH_MIN: f32 = 20.0;
pub const DESIRED_WIDTH_MAX: f32 = 60.0;

// Floor / room count bounds
pub const FLOORS_MIN: u32 = 1;
pub const FLOORS_MAX: u32 = 30;
pub const ROOMS_MIN: u32 = 4;
pub const ROOMS_MAX: u32 = 13;

// A facade reads as "modern" when both tolerances are tight
pub const MODERN_GUTTER_LIMIT: f32 = 0.3;
pub const MODERN_PADDING_LIMIT: f32 = 0.5;

// Lighting policy
pub const MODERN_CONFORMITY: f32 = 0.95;
pub const OLDER_CONFORMITY: f32 = 0.7;
pub const VACANCY_CHANCE: f32 = 0.1; // unconditional dark-window chance

// Geometry details
pub const WINDOW_SURFACE_OFFSET: f32 = 0.05; // lift panes off the facade
pub const ROOF_OVERHANG: f32 = 2.0;          // roof slab extends past the footprint
pub const ROOF_THICKNESS: f32 = 2.0;
pub const ROOF_EMISSIVE_MODERN: f32 = 2.0;
pub const ROOF_EMISSIVE_OLDER: f32 = 0.5;

// City layout
pub const BLOCK_SIZE: f32 = 100.0;      // total lot pitch, roads excluded
pub const SIDEWALK_WIDTH: f32 = 5.0;    // sidewalk ring around each lot
pub const BUILDING_MARGIN: f32 = 5.0;   // gap between building and sidewalk
pub const ROAD_WIDTH: f32 = 20.0;       // gap between adjacent lots
pub const GRID_RADIUS: i32 = 6;         // blocks from -r..=r on both axes
pub const BLOCK_JITTER: f32 = 5.0;      // +- positional jitter per block
pub const BUILDING_MAX_HEIGHT: f32 = 200.0;

// Rail track; control points are authored at unit scale and blown up here
pub const TRACK_SCALE_XZ: f32 = 30.0;
pub const TRACK_SCALE_Y: f32 = 8.0;
pub const TRACK_LIFT: f32 = 100.0;      // base ride height over the streets
pub const TRACK_SEGMENTS: usize = 200;
pub const TRACK_WIDTH: f32 = 1.2;
pub const TRACK_THICKNESS: f32 = 0.3;
pub const TRACK_DASH_RUN: usize = 2;    // lit segments per dash period
pub const TRACK_DASH_PERIOD: usize = 4;
pub const TRACK_PULSE_RATE: f32 = 1.8;  // emissive pulse, radians per second

// Camera ride feel
pub const RIDE_LIFT: f32 = 2.0;             // camera height over the rail
pub const RIDE_CATCHUP: f32 = 0.03;         // progress easing per 60Hz frame
pub const RIDE_KEY_SPEED: f32 = 0.42;       // target progress per second held
pub const RIDE_WHEEL_SPEED: f32 = 0.0002;   // target progress per wheel unit
pub const LEAN_SPEED: f32 = 45.0;           // sideways look units per second
pub const LEAN_RETURN: f32 = 6.0;           // spring-back rate per second
pub const LOOK_AHEAD: f32 = 0.01;           // look target lead, track fraction
pub const LOOK_RAISE: f32 = 1.0;            // look target lift over the rail

// Star field
pub const STAR_COUNT: usize = 50_000;
pub const STAR_RADIUS: f32 = 3000.0;
pub const STAR_SHELL_DIM: f32 = 0.6; // shell-wide brightness ceiling

// Particle tube around the ride
pub const PARTICLE_COUNT: usize = 12_000;
pub const PARTICLE_TUBE_RADIUS: f32 = 60.0;
pub const PARTICLE_TUBE_LENGTH: f32 = 450.0;
pub const PARTICLE_DRIFT: f32 = 1.2;  // lateral drift speed cap
pub const PARTICLE_FLOW: f32 = 6.0;   // along-tube flow speed cap

// Milestone rings
pub const RING_RADIUS: f32 = 12.0;
pub const RING_TUBE_RADIUS: f32 = 0.5;
pub const RING_MIN_OPACITY: f32 = 0.05;
pub const RING_MAX_OPACITY: f32 = 0.7;
pub const RING_START_FADE: f32 = 0.08;  // track distance where fading begins
pub const RING_FADE_RANGE: f32 = 0.15;
