//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! template engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │     (Drives TemplateCommand::process)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ArgumentParser, RenderService,        │
//! │   TemplateCommand)                      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: Filesystem, Renderer, Prompt) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, SimpleRenderer, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Argument, Template, RenderContext)     │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! // 1. Describe the template
//! let template = Template::builder()
//!     .name("maven-app")
//!     .argument(Argument::required("name"))
//!     .argument(Argument::with_default("version", "1.0"))
//!     .file("templates/pom.xml.tpl", "{name}/pom.xml")
//!     .build()?;
//!
//! // 2. Wire it to adapters and run an operation
//! let service = RenderService::new(renderer, filesystem, prompt);
//! let command = TemplateCommand::new(template, service);
//! let result = command.process("create", &["myapp".into(), "_".into()])?;
//! println!("{}", result.message);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArgumentParser, RenderService, TemplateCommand, TemplateInfo,
        ports::{Filesystem, Prompt, TemplateRenderer},
    };
    pub use crate::domain::{
        Argument, ArgumentKind, ArgumentResult, Capability, CommandResult, ContextValue,
        FileOutcome, FileReport, RenderContext, Template, TemplateBuilder, TemplateFile,
        TemplateHooks,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
