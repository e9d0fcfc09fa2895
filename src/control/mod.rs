pub mod environment;
pub mod guidance;
pub mod landing;
pub mod planet;
pub mod propulsion;
pub mod rocket;
