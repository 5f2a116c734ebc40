/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::parser::ValueSource;
use clap::ArgMatches;
use fbshow_bmp::BmpDecoder;
use fbshow_core::pixels::PixelBuffer;
use fbshow_fbdev::{
    install_signal_handlers, BlitLoop, Display, FramebufferDevice, MemoryFramebuffer, ShutdownToken
};
use log::{debug, info, trace};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::cmd_parsers::{get_blit_options, get_decoder_options};
use crate::errors::FbshowErrors;
use crate::file_io::read_input;
use crate::probe_files::{probe_device, probe_input_file};

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), FbshowErrors> {
    info!("Creating workflows from input");

    if args.value_source("device") == Some(ValueSource::DefaultValue) && cmd_opts.dry_run.is_none() {
        debug!("No device given, using {}", cmd_opts.device.display());
    }

    if cmd_opts.device_info {
        return match cmd_opts.dry_run {
            Some((width, height)) => probe_device(
                &cmd_opts.device,
                MemoryFramebuffer::new(width, height)
            ),
            None => with_linux_device(cmd_opts, |device| probe_device(&cmd_opts.device, device))
        };
    }

    let input = cmd_opts
        .input
        .as_ref()
        .ok_or(FbshowErrors::GenericStatic("No input file given"))?;
    let bytes = read_input(input, cmd_opts.mmap)?;

    if cmd_opts.probe {
        return probe_input_file(input, &bytes, cmd_opts.strict_mode);
    }

    let image = decode_image(&bytes, cmd_opts)?;
    // the decoded copy is all we need from here on
    drop(bytes);

    match cmd_opts.dry_run {
        Some((width, height)) => {
            info!("Rendering into a simulated {width}x{height} device");
            let display = display_image(MemoryFramebuffer::new(width, height), image, cmd_opts)?;
            debug!("Simulated device activated {} times", display.device().activations());
            Ok(())
        }
        None => with_linux_device(cmd_opts, |device| {
            display_image(device, image, cmd_opts).map(drop)
        })
    }
}

/// Decode a 24 bit bmp file into canonical pixels
pub(crate) fn decode_image(bytes: &[u8], cmd_opts: &CmdOptions) -> Result<PixelBuffer, FbshowErrors> {
    let mut decoder = BmpDecoder::new_with_options(bytes, get_decoder_options(cmd_opts));
    decoder.decode_headers()?;

    if let Some(header) = decoder.header() {
        info!("Image width: {}", header.width);
        info!("Image height: {}", header.height);
        info!("Pixel data offset: {}", header.pixel_offset);
        trace!("Header: {:?}", header);
    }
    Ok(decoder.decode()?)
}

/// Put `image` on `device` and keep it there.
///
/// With `--once` the frame is drawn a single time, otherwise it is
/// redrawn until a termination signal arrives. The display is handed
/// back, dropping it releases the device.
pub(crate) fn display_image<D: FramebufferDevice>(
    device: D, image: PixelBuffer, cmd_opts: &CmdOptions
) -> Result<Display<D>, FbshowErrors> {
    let mut blit = BlitLoop::new(get_blit_options(cmd_opts));
    blit.load_image(image)?;

    let display = Display::open(device)?;
    blit.attach(display)?;

    if cmd_opts.once {
        blit.present()?;
        info!("Image drawn once");

        return blit
            .into_display()
            .ok_or(FbshowErrors::GenericStatic("Display lost after drawing"));
    }

    let shutdown = ShutdownToken::new();
    install_signal_handlers(&shutdown)?;

    blit.run(&shutdown)?
        .ok_or(FbshowErrors::GenericStatic("Display lost after shutdown"))
}

#[cfg(target_os = "linux")]
fn with_linux_device<F>(cmd_opts: &CmdOptions, func: F) -> Result<(), FbshowErrors>
where
    F: FnOnce(fbshow_fbdev::LinuxFramebuffer) -> Result<(), FbshowErrors>
{
    let device = fbshow_fbdev::LinuxFramebuffer::open(&cmd_opts.device)?;
    func(device)
}

// there is no device to hand out, `func` is never called
#[cfg(not(target_os = "linux"))]
fn with_linux_device<F>(_: &CmdOptions, _func: F) -> Result<(), FbshowErrors>
where
    F: FnOnce(MemoryFramebuffer) -> Result<(), FbshowErrors>
{
    Err(FbshowErrors::GenericStatic(
        "Framebuffer devices are only supported on Linux, use --dry-run"
    ))
}
