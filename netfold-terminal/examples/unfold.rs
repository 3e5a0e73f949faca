/// Renders one mid-unfold frame of a cone to stdout, without entering the
/// interactive shell. Handy for eyeballing the rasterizer output.
use netfold_core::{parse_shape, ShapeView};
use netfold_terminal::AsciiRenderer;
use std::io;

fn main() -> io::Result<()> {
    let shape = parse_shape("cone r=1 h=2")
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
    let mut view = ShapeView::new(shape, 80, 40)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

    view.unfold();
    // A second and a half into the unfold, both groups are mid-crossfade.
    for _ in 0..45 {
        view.advance(1.0 / 30.0);
    }

    let mut renderer = AsciiRenderer::new(80, 40);
    renderer.render_view(&view);
    renderer.draw(&mut io::stdout().lock())
}
