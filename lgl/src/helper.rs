use anyhow::anyhow;
use gl_loader::{CommandId, DispatchContext, DispatchError, SymbolLoader};
use gl_typed_generator::{parse_value, Registry};

/// The handful of commands the demo draws with, bound once by id.
pub struct Gl<L> {
    ctx: DispatchContext<L>,
    clear: CommandId,
    clear_color: CommandId,
    color_buffer_bit: u32,
}

impl<L: SymbolLoader> Gl<L> {
    pub fn new(ctx: DispatchContext<L>, registry: &Registry) -> anyhow::Result<Gl<L>> {
        let id = |name: &str| {
            ctx.table()
                .id(name)
                .ok_or_else(|| anyhow!("{} is not available for this target", name))
        };
        let clear = id("glClear")?;
        let clear_color = id("glClearColor")?;

        let color_buffer_bit = registry
            .enumerant("GL_COLOR_BUFFER_BIT")
            .and_then(|e| parse_value(&e.value))
            .ok_or_else(|| anyhow!("GL_COLOR_BUFFER_BIT is missing from the registry"))? as u32;

        Ok(Gl { ctx, clear, clear_color, color_buffer_bit })
    }

    pub fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) -> Result<(), DispatchError> {
        self.ctx.invoke(self.clear_color, |cmd| unsafe {
            cmd.cast::<extern "system" fn(f32, f32, f32, f32)>()(red, green, blue, alpha)
        })
    }

    pub fn clear_color_buffer(&self) -> Result<(), DispatchError> {
        let mask = self.color_buffer_bit;
        self.ctx.invoke(self.clear, |cmd| unsafe { cmd.cast::<extern "system" fn(u32)>()(mask) })
    }
}
