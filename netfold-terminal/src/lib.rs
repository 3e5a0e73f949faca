/// Terminal shell for the unfold/fold animation engine
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use netfold_core::{Shape, ShapeView};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Main application struct driving one shape view in the terminal
pub struct TerminalApp {
    view: ShapeView,
    kind: netfold_core::ShapeKind,
    renderer: AsciiRenderer,
    running: bool,
    last_update: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(shape: Box<dyn Shape>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let kind = shape.kind();
        let view = ShapeView::new(shape, width as u32, height as u32)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

        Ok(Self {
            view,
            kind,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_update: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        self.last_update = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Advance the animation by real elapsed time
            let now = Instant::now();
            let dt = (now - self.last_update).as_secs_f32();
            self.last_update = now;
            self.view.advance(dt);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Swap in a fresh view of another shape with its default parameters.
    /// Nothing survives navigation; the old view is dropped wholesale.
    fn load_shape(&mut self, kind: netfold_core::ShapeKind) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.view = ShapeView::new(kind.default_shape(), width as u32, height as u32)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
        self.kind = kind;
        debug!("switched to {}", kind.name());
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('u') => self.view.unfold(),
                KeyCode::Char('f') => self.view.fold(),
                KeyCode::Char('i') => self.view.toggle_info(),
                KeyCode::Char('+') | KeyCode::Char('=') => self.view.increase_size(),
                KeyCode::Char('-') => self.view.decrease_size(),
                KeyCode::Char('z') => self.view.zoom_in(),
                KeyCode::Char('x') => self.view.zoom_out(),
                KeyCode::Char('0') => self.view.reset_view(),
                KeyCode::Char('n') => self.load_shape(self.kind.next())?,
                KeyCode::Char('p') => self.load_shape(self.kind.prev())?,
                _ => {}
            },
            Event::Resize(width, height) => {
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.view.set_viewport(width as u32, height as u32);
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;

        // Clear renderer
        self.renderer.clear();

        // Render the current view
        self.renderer.render_view(&self.view);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Netfold [{}] | FPS: {:.1} | U=Unfold F=Fold I=Info +/-=Size Z/X=Zoom 0=Reset N/P=Shape Q=Quit",
                self.kind.name(),
                self.fps
            )),
            ResetColor
        )?;

        // Measurement panel
        let measurements = self.view.measurements();
        queue!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::DarkCyan),
            Print(&measurements.params)
        )?;
        for (i, line) in measurements.lines.iter().enumerate() {
            queue!(stdout, cursor::MoveTo(0, 2 + i as u16), Print(line))?;
        }
        queue!(stdout, ResetColor)?;

        // Info labels at their projected screen positions
        let frame = self.view.view_frame(width as u32, height as u32);
        queue!(stdout, SetForegroundColor(Color::Green))?;
        for label in &frame.labels {
            if label.x < 0.0 || label.y < 0.0 {
                continue;
            }
            let (x, y) = (label.x as u16, label.y as u16);
            if x >= width || y >= height {
                continue;
            }
            queue!(stdout, cursor::MoveTo(x, y), Print(label.text))?;
        }
        queue!(stdout, ResetColor)?;

        stdout.flush()?;
        Ok(())
    }
}
