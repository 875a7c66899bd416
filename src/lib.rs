//! Soft-body "jello" simulation drawn onto a pannable, zoomable 2D canvas.
//!
//! `jelly-canvas` steps a world of pressure- and spring-driven soft bodies at
//! a fixed rate and redraws every body outline after each tick. The host
//! supplies the canvas and the timer, so the same loop runs in a browser and
//! headless under test.
//!
//! # Features
//!
//! - **Soft bodies**: point-mass polygons with edge springs, shape matching,
//!   gas pressure and gravity
//! - **Collisions**: body/body penetration resolution with elasticity and friction
//! - **Draw surfaces**: a device-pixel surface over any [`Canvas2d`] and a
//!   world-space [`TransformingSurface`] with live pan and zoom
//! - **Injected hosts**: [`Canvas2d`] and [`Scheduler`] traits, with
//!   [`RecordingCanvas`] and [`ManualScheduler`] for tests
//! - **Observable**: monitor world steps via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod point;
pub mod color;
pub mod point_mass;
pub mod spring;
pub mod shape;
pub mod component;
pub mod body;
pub mod collision;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;
pub mod surface;
pub mod transform;
pub mod recording;
pub mod scheduler;
pub mod scene;
pub mod simulation;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use point::{DevicePoint, Dimension, WorldPoint};
pub use color::Color;
pub use point_mass::PointMass;
pub use shape::ClosedShape;
pub use component::{Component, GravityComponent, PressureComponent, SpringComponent};
pub use body::Body;
pub use world::World;
pub use observer::{StepObserver, NoOpStepObserver};
pub use config::{LoopConfig, WorldConfig};
pub use error::JellyError;
pub use surface::{Canvas2d, DrawSurface, PixelSurface};
pub use transform::{Transform, TransformHandle, TransformingSurface};
pub use recording::{CanvasCall, RecordingCanvas};
pub use scheduler::{ManualScheduler, Scheduler, TickHandle};
pub use scene::{BallOptions, BoxOptions, SceneBuilder};
pub use simulation::{BodyView, PhysicsWorld, SimulationLoop};
