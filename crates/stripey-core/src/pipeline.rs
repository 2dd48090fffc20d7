//! The render pipeline: markup in, PNG out.
//!
//! Stages run in order and the first failure aborts the run:
//!
//! 1. resolve the command line into a [`LabelConfig`] and output target
//! 2. read the markup and parse it, keeping the first label
//! 3. draw the label as a PNG
//! 4. rotate the PNG by the configured angle
//! 5. write the bytes to the file or standard output
//!
//! Nothing is written unless every earlier stage succeeded.

use std::io::{Read, Write};

use tracing::debug;

use crate::config::{resolve, Command, Invocation, LabelConfig};
use crate::draw::{DrawError, Drawer, DrawerOptions};
use crate::error::PipelineError;
use crate::output::write_output;
use crate::transform::rotate_png;
use crate::zpl::{LabelInfo, ParseError, ZplParser};

/// Turns markup bytes into labels.
pub trait MarkupParser {
    fn parse(&self, markup: &[u8]) -> Result<Vec<LabelInfo>, ParseError>;
}

/// Turns a label into an encoded PNG.
pub trait LabelDrawer {
    fn draw_label_as_png(
        &self,
        label: &LabelInfo,
        options: &DrawerOptions,
    ) -> Result<Vec<u8>, DrawError>;
}

/// What a successful run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An image was written.
    Rendered,
    /// `--help` was requested; nothing was rendered.
    Help,
    /// `--version` was requested; nothing was rendered.
    Version,
}

/// A parser and a drawer wired into the render stages.
#[derive(Debug, Clone)]
pub struct Pipeline<P = ZplParser, D = Drawer> {
    parser: P,
    drawer: D,
}

impl Default for Pipeline<ZplParser, Drawer> {
    fn default() -> Self {
        Self::new(ZplParser::new(), Drawer::new())
    }
}

impl<P: MarkupParser, D: LabelDrawer> Pipeline<P, D> {
    pub fn new(parser: P, drawer: D) -> Self {
        Self { parser, drawer }
    }

    /// Resolve `args` and, for a render request, read `input` in full and
    /// write the image to the configured file or `stdout`.
    pub fn execute<I, S, R, W>(
        &self,
        args: I,
        input: R,
        stdout: W,
    ) -> Result<Outcome, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: Read,
        W: Write,
    {
        match resolve(args)? {
            Command::Help => Ok(Outcome::Help),
            Command::Version => Ok(Outcome::Version),
            Command::Render(invocation) => {
                self.run(invocation, input, stdout)?;
                Ok(Outcome::Rendered)
            }
        }
    }

    /// Render markup read from `input` and write the result.
    pub fn run<R: Read, W: Write>(
        &self,
        invocation: Invocation,
        mut input: R,
        stdout: W,
    ) -> Result<(), PipelineError> {
        let mut markup = Vec::new();
        input
            .read_to_end(&mut markup)
            .map_err(PipelineError::InputRead)?;
        debug!(bytes = markup.len(), "Read markup");

        let image = self.render(&markup, &invocation.config)?;
        write_output(&image, invocation.output.as_deref(), stdout)
    }

    /// Markup bytes to final (rotated) PNG bytes.
    pub fn render(&self, markup: &[u8], config: &LabelConfig) -> Result<Vec<u8>, PipelineError> {
        let label = self.decode_markup(markup)?;
        let png = self.rasterize(&label, config)?;
        let rotated = rotate_png(png, config.rotation)?;
        debug!(
            bytes = rotated.len(),
            rotation = config.rotation,
            "Image ready"
        );
        Ok(rotated)
    }

    /// Parse markup and keep the first label; the rest are discarded.
    pub fn decode_markup(&self, markup: &[u8]) -> Result<LabelInfo, PipelineError> {
        let labels = self.parser.parse(markup)?;
        let total = labels.len();
        let label = labels
            .into_iter()
            .next()
            .ok_or(PipelineError::NoLabelsFound)?;
        if total > 1 {
            debug!(discarded = total - 1, "Rendering first label only");
        }
        Ok(label)
    }

    /// Draw a label at the configured size and density.
    pub fn rasterize(
        &self,
        label: &LabelInfo,
        config: &LabelConfig,
    ) -> Result<Vec<u8>, PipelineError> {
        let options = DrawerOptions::from(config);
        let png = self.drawer.draw_label_as_png(label, &options)?;
        debug!(
            bytes = png.len(),
            width_mm = options.label_width_mm,
            height_mm = options.label_height_mm,
            dpmm = options.dpmm,
            "Label rasterized"
        );
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::io;

    use crate::decode::{decode_png, png_dimensions, PixelGrid};
    use crate::encode::encode_png;
    use crate::zpl::{Anchor, ElementKind, LabelElement, LineColor, Origin};
    use image::ColorType;

    const CONFIG: &str = r#"{"labelWidthMm":50,"labelHeightMm":30,"dpmm":8,"rotation":0}"#;
    const ZPL: &[u8] = b"^XA^FO10,10^GB100,50,3^FS^XZ";

    /// Returns fixed labels and counts calls.
    struct FakeParser {
        labels: Vec<LabelInfo>,
        calls: Cell<usize>,
    }

    impl FakeParser {
        fn returning(labels: Vec<LabelInfo>) -> Self {
            Self {
                labels,
                calls: Cell::new(0),
            }
        }
    }

    impl MarkupParser for FakeParser {
        fn parse(&self, _markup: &[u8]) -> Result<Vec<LabelInfo>, ParseError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.labels.clone())
        }
    }

    struct FailingParser;

    impl MarkupParser for FailingParser {
        fn parse(&self, _markup: &[u8]) -> Result<Vec<LabelInfo>, ParseError> {
            Err(ParseError::GraphicField("bad data".into()))
        }
    }

    /// Draws a blank grayscale PNG of the configured size and records what
    /// it was asked to draw.
    #[derive(Default)]
    struct FakeDrawer {
        drawn: RefCell<Vec<(LabelInfo, DrawerOptions)>>,
        output: Option<Vec<u8>>,
    }

    impl LabelDrawer for FakeDrawer {
        fn draw_label_as_png(
            &self,
            label: &LabelInfo,
            options: &DrawerOptions,
        ) -> Result<Vec<u8>, DrawError> {
            self.drawn.borrow_mut().push((label.clone(), options.clone()));
            if let Some(output) = &self.output {
                return Ok(output.clone());
            }
            let width = (options.label_width_mm * options.dpmm as f64) as u32;
            let height = (options.label_height_mm * options.dpmm as f64) as u32;
            Ok(encode_png(&PixelGrid::blank(width, height, ColorType::L8))?)
        }
    }

    struct FailingDrawer;

    impl LabelDrawer for FailingDrawer {
        fn draw_label_as_png(
            &self,
            _label: &LabelInfo,
            options: &DrawerOptions,
        ) -> Result<Vec<u8>, DrawError> {
            Err(DrawError::InvalidDensity(options.dpmm))
        }
    }

    struct BrokenInput;

    impl Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "stdin closed"))
        }
    }

    fn boxed_label(width: u32) -> LabelInfo {
        LabelInfo {
            elements: vec![LabelElement {
                origin: Origin {
                    x: 0,
                    y: 0,
                    anchor: Anchor::TopLeft,
                },
                reverse: false,
                kind: ElementKind::GraphicBox {
                    width,
                    height: 1,
                    thickness: 1,
                    color: LineColor::Black,
                    rounding: 0,
                },
            }],
            ..LabelInfo::default()
        }
    }

    fn config(rotation: i32) -> LabelConfig {
        LabelConfig {
            rotation,
            ..LabelConfig::from_json(CONFIG).unwrap()
        }
    }

    fn real_pipeline() -> Pipeline {
        Pipeline::new(ZplParser::new(), Drawer::without_system_fonts())
    }

    #[test]
    fn test_missing_config_invokes_nothing() {
        let pipeline = Pipeline::new(
            FakeParser::returning(vec![boxed_label(1)]),
            FakeDrawer::default(),
        );
        let mut stdout = Vec::new();

        let err = pipeline
            .execute(["--output", "ignored.png"], ZPL, &mut stdout)
            .unwrap_err();

        assert!(matches!(err, PipelineError::MissingConfig));
        assert_eq!(err.to_string(), "config is required");
        assert_eq!(pipeline.parser.calls.get(), 0);
        assert!(pipeline.drawer.drawn.borrow().is_empty());
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let pipeline = Pipeline::new(FakeParser::returning(vec![]), FakeDrawer::default());
        let err = pipeline
            .execute(["--config", "{\"dpmm\":"], ZPL, io::sink())
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
        assert_eq!(pipeline.parser.calls.get(), 0);
    }

    #[test]
    fn test_help_and_version_render_nothing() {
        let pipeline = Pipeline::new(FakeParser::returning(vec![]), FakeDrawer::default());
        assert_eq!(
            pipeline.execute(["--help"], ZPL, io::sink()).unwrap(),
            Outcome::Help
        );
        assert_eq!(
            pipeline.execute(["--version"], ZPL, io::sink()).unwrap(),
            Outcome::Version
        );
        assert_eq!(pipeline.parser.calls.get(), 0);
    }

    #[test]
    fn test_no_labels_writes_nothing() {
        let pipeline = Pipeline::new(FakeParser::returning(vec![]), FakeDrawer::default());
        let mut stdout = Vec::new();

        let err = pipeline
            .execute(["--config", CONFIG], &b""[..], &mut stdout)
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoLabelsFound));
        assert_eq!(err.to_string(), "no labels found in ZPL content");
        assert_eq!(pipeline.parser.calls.get(), 1);
        assert!(pipeline.drawer.drawn.borrow().is_empty());
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_first_label_wins() {
        let labels = vec![boxed_label(1), boxed_label(2), boxed_label(3)];
        let pipeline = Pipeline::new(FakeParser::returning(labels), FakeDrawer::default());

        pipeline
            .execute(["--config", CONFIG], ZPL, io::sink())
            .unwrap();

        let drawn = pipeline.drawer.drawn.borrow();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].0, boxed_label(1));
        assert_eq!(drawn[0].1.dpmm, 8);
        assert_eq!(drawn[0].1.label_width_mm, 50.0);
    }

    #[test]
    fn test_parse_error_names_stage() {
        let pipeline = Pipeline::new(FailingParser, FakeDrawer::default());
        let err = pipeline.render(ZPL, &config(0)).unwrap_err();
        assert!(matches!(err, PipelineError::MarkupParse(_)));
        assert_eq!(err.to_string(), "parsing ZPL: graphic field: bad data");
    }

    #[test]
    fn test_draw_error_names_stage() {
        let pipeline = Pipeline::new(FakeParser::returning(vec![boxed_label(1)]), FailingDrawer);
        let err = pipeline.render(ZPL, &config(0)).unwrap_err();
        assert!(matches!(err, PipelineError::Render(_)));
        assert!(err.to_string().starts_with("generating label image: "));
    }

    #[test]
    fn test_undecodable_drawer_output() {
        let drawer = FakeDrawer {
            output: Some(b"not a png".to_vec()),
            ..FakeDrawer::default()
        };
        let pipeline = Pipeline::new(FakeParser::returning(vec![boxed_label(1)]), drawer);

        let err = pipeline.render(ZPL, &config(90)).unwrap_err();
        assert!(matches!(err, PipelineError::ImageDecode(_)));
        assert!(err.to_string().starts_with("rotating image: decoding PNG: "));

        // Without rotation the bytes pass through untouched.
        assert_eq!(pipeline.render(ZPL, &config(0)).unwrap(), b"not a png");
    }

    #[test]
    fn test_input_read_error() {
        let pipeline = Pipeline::new(FakeParser::returning(vec![]), FakeDrawer::default());
        let err = pipeline
            .execute(["--config", CONFIG], BrokenInput, io::sink())
            .unwrap_err();
        assert!(matches!(err, PipelineError::InputRead(_)));
        assert_eq!(err.to_string(), "reading stdin: stdin closed");
        assert_eq!(pipeline.parser.calls.get(), 0);
    }

    #[test]
    fn test_end_to_end_unrotated() {
        let png = real_pipeline().render(ZPL, &config(0)).unwrap();
        assert_eq!(png_dimensions(&png).unwrap(), (400, 240));
    }

    #[test]
    fn test_end_to_end_rotated() {
        let pipeline = real_pipeline();
        let upright = decode_png(&pipeline.render(ZPL, &config(0)).unwrap()).unwrap();

        for (rotation, expected) in [(90, (240, 400)), (180, (400, 240)), (270, (240, 400))] {
            let png = pipeline.render(ZPL, &config(rotation)).unwrap();
            let grid = decode_png(&png).unwrap();
            assert_eq!((grid.width, grid.height), expected, "rotation {rotation}");
            assert_eq!(grid.color, upright.color);
        }

        // The box corner at (10, 10) lands where the 90 degree mapping says.
        let rotated = decode_png(&pipeline.render(ZPL, &config(90)).unwrap()).unwrap();
        assert_eq!(upright.pixel(10, 10), &[0]);
        assert_eq!(rotated.pixel(10, 400 - 1 - 10), &[0]);
    }

    #[test]
    fn test_oversized_fields_fail_cleanly() {
        let small = LabelConfig {
            label_width_mm: 10.0,
            label_height_mm: 10.0,
            ..config(0)
        };
        let pipeline = real_pipeline();
        for zpl in [
            "^XA^FO0,0^GB4000000000,4000000000,1^FS^XZ",
            "^XA^FO0,0^GFA,1,1,100000000000000,F^FS^XZ",
            "^XA^FO0,0^BCN,4294967295,N^FD123^FS^XZ",
            "^XA^LH2000000000,0^FO2000000000,0^GB1,1,1^FS^XZ",
        ] {
            let err = pipeline.render(zpl.as_bytes(), &small).unwrap_err();
            assert!(matches!(err, PipelineError::MarkupParse(_)), "{zpl}");
        }

        let wide = format!("^XA^BY10^FO0,0^BCN,100,N^FD{}^FS^XZ", "A".repeat(500));
        let err = pipeline.render(wide.as_bytes(), &small).unwrap_err();
        assert!(matches!(err, PipelineError::Render(DrawError::Barcode(_))));
    }

    #[test]
    fn test_unsupported_rotation_passes_through() {
        let pipeline = real_pipeline();
        let upright = pipeline.render(ZPL, &config(0)).unwrap();
        assert_eq!(pipeline.render(ZPL, &config(45)).unwrap(), upright);
        assert_eq!(pipeline.render(ZPL, &config(-90)).unwrap(), upright);
    }

    #[test]
    fn test_file_output_matches_stdout() {
        let pipeline = real_pipeline();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.png");
        let rotated = r#"{"labelWidthMm":50,"labelHeightMm":30,"dpmm":8,"rotation":90}"#;

        let mut stdout = Vec::new();
        let outcome = pipeline
            .execute(["--config", rotated], ZPL, &mut stdout)
            .unwrap();
        assert_eq!(outcome, Outcome::Rendered);

        let mut unused = Vec::new();
        let path_arg = path.to_string_lossy().into_owned();
        pipeline
            .execute(
                ["--config", rotated, "--output", path_arg.as_str()],
                ZPL,
                &mut unused,
            )
            .unwrap();

        assert!(unused.is_empty());
        assert!(!stdout.is_empty());
        assert_eq!(std::fs::read(&path).unwrap(), stdout);
        assert_eq!(png_dimensions(&stdout).unwrap(), (240, 400));
    }
}
