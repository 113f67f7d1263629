use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    /// SDL2 reports most failures as bare strings
    #[error("sdl2: {0}")]
    Sdl(String),

    #[error(transparent)]
    Window(#[from] sdl2::video::WindowBuildError),

    #[error(transparent)]
    Canvas(#[from] sdl2::IntegerOrSdlError),

    #[error(transparent)]
    Texture(#[from] sdl2::render::TextureValueError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<String> for DisplayError {
    fn from(e: String) -> Self {
        DisplayError::Sdl(e)
    }
}
