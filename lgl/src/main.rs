#[macro_use]
extern crate log;

use std::{
    fs, io,
    path::PathBuf,
    rc::Rc,
    sync::Arc,
    thread,
    time::Duration,
};

use anyhow::{anyhow, Context};
use clap::Parser;
use gl_loader::{DispatchContext, DispatchTable};
use gl_typed_generator::{
    linearize, Api, DebugPrints, Fallbacks, Profile, Registry, Target, TypedEnumGenerator, Version,
};
use glutin::event::{Event, WindowEvent};
use rand::prelude::*;

mod debug;
mod helper;

const GL_SUBSET: &str = include_str!("../registry/gl_subset.json");

/// Loads a registry snapshot, linearizes it for one target and either prints the typed
/// enumerations or drives a window through the resulting dispatch table.
#[derive(Debug, Parser)]
#[command(name = "lgl", version)]
struct Args {
    /// Registry snapshot (JSON); defaults to the bundled GL subset.
    #[arg(long)]
    registry: Option<PathBuf>,

    #[arg(long, default_value = "gl")]
    api: Api,

    #[arg(long = "gl-version", default_value = "4.6")]
    gl_version: Version,

    #[arg(long)]
    profile: Option<Profile>,

    /// Enable an extension; may be repeated.
    #[arg(long = "extension", short = 'e')]
    extensions: Vec<String>,

    /// Write the typed enumerations to stdout and exit.
    #[arg(long)]
    dump_enums: bool,

    /// Bind only each command's own name.
    #[arg(long)]
    no_fallbacks: bool,

    /// Trace every dispatched call.
    #[arg(long)]
    trace_calls: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let registry = match &args.registry {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Registry::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        },
        None => Registry::from_json(GL_SUBSET).context("loading the bundled registry")?,
    };

    let mut target = Target::new(args.api, args.gl_version);
    target.profile = args.profile;
    target.extensions.extend(args.extensions.iter().cloned());

    let available = linearize(&registry, &target);
    if available.is_empty() {
        return Err(anyhow!("{} {} is not described by this registry", target.api, target.version));
    }
    debug::report_availability(&available);

    if args.dump_enums {
        let stdout = io::stdout();
        registry.write_bindings(Some(&available), TypedEnumGenerator, &mut stdout.lock())?;
        return Ok(());
    }

    let fallbacks = if args.no_fallbacks { Fallbacks::None } else { Fallbacks::All };
    let table = Arc::new(DispatchTable::for_availability(&registry, &available, fallbacks));
    let debug_prints = if args.trace_calls { DebugPrints::FunctionCalls } else { DebugPrints::None };
    run_window(&registry, table, debug_prints)
}

fn run_window(registry: &Registry, table: Arc<DispatchTable>, debug_prints: DebugPrints) -> anyhow::Result<()> {
    let el = glutin::event_loop::EventLoop::new();
    let wb = glutin::window::WindowBuilder::new().with_title("lgl");
    let w_context = glutin::ContextBuilder::new().build_windowed(wb, &el).context("creating the GL window")?;
    let w_context = unsafe { w_context.make_current() }.map_err(|(_, err)| anyhow!("making the context current: {}", err))?;
    let w_context = Rc::new(w_context);

    let proc_context = Rc::clone(&w_context);
    let has_error_query = table.id("glGetError").is_some();
    let mut gl = DispatchContext::load_with(table, move |s: &str| proc_context.get_proc_address(s))
        .with_debug_prints(debug_prints);
    if has_error_query {
        gl = gl.with_error_checks("glGetError")?;
    }
    debug::report_bindings(&gl);

    let gl = helper::Gl::new(gl, registry)?;
    let mut rng = rand::thread_rng();

    el.run(move |event, _, control_flow| {
        *control_flow = glutin::event_loop::ControlFlow::Poll;

        match event {
            Event::LoopDestroyed => (),
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(new_size) => w_context.resize(new_size),
                WindowEvent::CloseRequested => *control_flow = glutin::event_loop::ControlFlow::Exit,
                _ => (),
            },
            Event::MainEventsCleared => {
                let red: f32 = rng.gen_range(0.0..=1.0);
                let green: f32 = rng.gen_range(0.0..=1.0);
                let blue: f32 = rng.gen_range(0.0..=1.0);

                if let Err(err) = gl.clear_color(red, green, blue, 1.0).and_then(|_| gl.clear_color_buffer()) {
                    error!("{}", err);
                    *control_flow = glutin::event_loop::ControlFlow::Exit;
                    return;
                }

                if let Err(err) = w_context.swap_buffers() {
                    error!("swapping buffers: {}", err);
                }
                thread::sleep(Duration::from_millis(300));
            },
            _ => (),
        }
    })
}
