//! Portrait decoding, done on the backend worker so the UI thread only uploads textures.

const PORTRAIT_MAX_EDGE: u32 = 300;

#[derive(Clone)]
pub struct PortraitImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_portrait(bytes: &[u8]) -> Result<PortraitImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = if dynamic.width() > PORTRAIT_MAX_EDGE || dynamic.height() > PORTRAIT_MAX_EDGE {
        dynamic.thumbnail(PORTRAIT_MAX_EDGE, PORTRAIT_MAX_EDGE)
    } else {
        dynamic
    };
    let rgba = resized.to_rgba8();
    Ok(PortraitImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}
