/// Image, SVG and mask decoding to premultiplied RGBA8.
pub mod decode;
/// Template asset loading and the user image source.
pub mod store;
