// ABOUTME: Images command implementation.
// ABOUTME: Lists local images from the Docker Engine API.

use shiftdeploy::docker::{BollardInventory, ImageInventory, local_image_names};
use shiftdeploy::error::Result;
use shiftdeploy::output::{Output, OutputMode};

pub async fn images(output: &Output) -> Result<()> {
    let inventory = BollardInventory::connect()?;
    let images = inventory.list_images().await?;

    if output.mode() == OutputMode::Json {
        output.json(&images);
        return Ok(());
    }

    let names = local_image_names(&images);
    if names.is_empty() {
        output.progress("No tagged images found");
    }
    for name in &names {
        output.item(name);
    }
    Ok(())
}
