pub type ColorValue = u8; // 8-bit channel value (0-255)
pub type ColorRGB = [ColorValue; 3];
pub type PixelCoord = u32;

pub const BLACK: ColorRGB = [0, 0, 0];
pub const WHITE: ColorRGB = [255, 255, 255];

/// An RGB raster with the origin at the top-left, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: PixelCoord,
    height: PixelCoord,
    pixels: Vec<ColorRGB>,
}

impl Bitmap {
    pub fn new(width: PixelCoord, height: PixelCoord, fill: ColorRGB) -> Self {
        Bitmap {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> PixelCoord {
        self.width
    }

    pub fn height(&self) -> PixelCoord {
        self.height
    }

    fn index(&self, x: PixelCoord, y: PixelCoord) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Panics if `(x, y)` lies outside the bitmap. Unlike `put`, reads are not clipped.
    pub fn get(&self, x: PixelCoord, y: PixelCoord) -> ColorRGB {
        self.pixels[self.index(x, y)]
    }

    /// Writes are clipped to the bitmap bounds.
    pub fn put(&mut self, x: PixelCoord, y: PixelCoord, color: ColorRGB) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    // Corner coordinates are inclusive on both ends.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: ColorRGB) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
    }

    pub fn outline_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: ColorRGB) {
        if x0 > x1 || y0 > y1 {
            return;
        }
        self.hline(x0, x1, y0, color);
        self.hline(x0, x1, y1, color);
        self.vline(x0, y0, y1, color);
        self.vline(x1, y0, y1, color);
    }

    pub fn hline(&mut self, x0: u32, x1: u32, y: u32, color: ColorRGB) {
        self.fill_rect(x0, y, x1, y, color);
    }

    pub fn vline(&mut self, x: u32, y0: u32, y1: u32, color: ColorRGB) {
        self.fill_rect(x, y0, x, y1, color);
    }

    /// Pixels in memory-address order: `y * width + x`.
    pub fn pixels(&self) -> &[ColorRGB] {
        &self.pixels
    }

    /// Packed 8-bit RGB samples, three bytes per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels().iter().flatten().copied().collect()
    }
}

impl From<image::RgbImage> for Bitmap {
    fn from(img: image::RgbImage) -> Self {
        Bitmap {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| p.0).collect(),
        }
    }
}
