use backdrop::BackdropError;

pub fn report_error(err: &BackdropError) {
    match err {
        BackdropError::InvalidColor(value) => {
            eprintln!("Could not read color `{value}`.");
            eprintln!();
            eprintln!("Colors are accepted as:");
            eprintln!("  - #rrggbb or rrggbb (hex)");
            eprintln!("  - r,g,b with each channel in 0-255");
        }
        BackdropError::Image(image_err) => {
            eprintln!("Could not process the image: {image_err}");
            eprintln!();
            eprintln!("Check that the input path exists and is a supported image format.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
