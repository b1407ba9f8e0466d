pub mod camera;
pub mod geospatial;
pub mod mesh;
pub mod pipelines;
pub mod scene;
pub mod window;
