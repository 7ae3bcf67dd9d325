use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chromogen_core::{
    BitDepth, BuilderUnsupported, ImageMetadata, ImageServer, Raster, RegionRequest, SampleData, ServerBuilder,
};
use chromogen_ext::{ChromogenExtension, ExtensionError, ImageSlot, load_image};
use image::{ImageBuffer, Luma};

fn write_gray16_png(name: &str, samples: Vec<u16>) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chromogen-ext-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_raw(2, 2, samples).unwrap();
    img.save(&path).unwrap();
    path
}

struct BrokenServer {
    metadata: ImageMetadata,
}

impl ImageServer for BrokenServer {
    fn path(&self) -> String {
        "broken".to_string()
    }

    fn server_type(&self) -> String {
        "Broken".to_string()
    }

    fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    fn read_region(&self, _request: &RegionRequest) -> io::Result<Option<Raster>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "slide locked"))
    }

    fn builder(&self) -> Result<ServerBuilder, BuilderUnsupported> {
        Err(BuilderUnsupported {
            server_type: self.server_type(),
        })
    }
}

#[test]
fn loaded_png_is_transformed_end_to_end() {
    let path = write_gray16_png("quad.png", vec![0, 100, 10000, 65535]);
    let server = load_image(&path).unwrap();
    assert_eq!(server.metadata().bit_depth, BitDepth::U16);
    assert_eq!(server.name(), "quad.png");

    let slot = ImageSlot::new();
    slot.set(Arc::new(server));

    let mut ext = ChromogenExtension::default();
    ext.install();
    let transformed = ext.apply_transform(&slot).unwrap();

    assert_eq!(transformed.path(), "memory://quad.png [sublinear transform]");
    assert_eq!(slot.current().unwrap().path(), transformed.path());

    let tile = transformed
        .read_region(&RegionRequest::new(transformed.path(), 0, 0, 2, 2))
        .unwrap()
        .unwrap();
    assert_eq!(tile.samples(), &SampleData::U16(vec![0, 2560, 25600, 65535]));

    let _ = std::fs::remove_file(path);
}

#[test]
fn unreadable_source_leaves_slot_unchanged() {
    let broken: Arc<dyn ImageServer> = Arc::new(BrokenServer {
        metadata: ImageMetadata::new("broken", 512, 512, 3, BitDepth::U8).with_tile_size(256, 256),
    });
    let slot = ImageSlot::new();
    slot.set(broken);

    let Err(err) = ChromogenExtension::default().apply_transform(&slot) else {
        panic!("transform should have been refused");
    };
    match err {
        ExtensionError::Io(e) => {
            assert_eq!(e.kind(), io::ErrorKind::PermissionDenied);
            assert_eq!(e.to_string(), "slide locked");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(slot.current().unwrap().path(), "broken");
}

#[test]
fn clearing_slot_makes_transform_fail() {
    let raster = Raster::new(4, 4, 1, BitDepth::U8);
    let slot = ImageSlot::new();
    slot.set(Arc::new(chromogen_core::MemoryImageServer::new("tmp", raster)));
    slot.clear();
    let Err(err) = ChromogenExtension::default().apply_transform(&slot) else {
        panic!("transform should have been refused");
    };
    assert!(matches!(err, ExtensionError::NoImage));
}
