pub const RENDER_WIDTH: i32 = 1280;           // Default viewer window width
pub const RENDER_HEIGHT: i32 = 720;           // Default viewer window height
pub const FPS: u32 = 60;                      // Frames per second

pub const SLIDE_DURATION: f32 = 8.0;          // Autoplay interval for image slides (seconds)
pub const VIDEO_SLIDE_DURATION: f32 = 12.0;   // Autoplay interval for video slides (seconds)
pub const SWIPE_THRESHOLD: f32 = 50.0;        // Horizontal drag needed to count as a swipe (pixels)

pub const KEN_BURNS_ZOOM: f32 = 0.08;         // Extra scale reached by the end of an image slide
pub const KEN_BURNS_PAN: f32 = 0.04;          // Pan distance as a fraction of the screen
