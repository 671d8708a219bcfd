// Indexed by [version (V1, V2/V2.5)][layer (1, 2, 3)][bitrate index], in kbps
#[rustfmt::skip]
pub(super) const BITRATES: [[[u32; 16]; 3]; 2] = [
	[
		[0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
		[0, 32, 48, 56,  64,  80,  96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
		[0, 32, 40, 48,  56,  64,  80,  96, 112, 128, 160, 192, 224, 256, 320, 0],
	],
	[
		[0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
		[0,  8, 16, 24, 32, 40, 48,  56,  64,  80,  96, 112, 128, 144, 160, 0],
		[0,  8, 16, 24, 32, 40, 48,  56,  64,  80,  96, 112, 128, 144, 160, 0],
	],
];

// Indexed by [version (V1, V2, V2.5)][sample rate index]
pub(super) const SAMPLE_RATES: [[u32; 3]; 3] = [
	[44100, 48000, 32000],
	[22050, 24000, 16000],
	[11025, 12000, 8000],
];

// Indexed by [layer][version (V1, V2/V2.5)]
pub(super) const SAMPLES: [[u16; 2]; 3] = [[384, 384], [1152, 1152], [1152, 576]];

// Indexed by [layer]
pub(super) const PADDING_SIZES: [u8; 3] = [4, 1, 1];

// Indexed by [version (V1, V2/V2.5)][channel mode]
pub(super) const SIDE_INFORMATION_SIZES: [[u32; 4]; 2] = [[32, 32, 32, 17], [17, 17, 17, 9]];
