/// Directory holding the staged patch files
pub const SOURCE_DIR: &str = "./patch/";
/// Extension matched when collecting class files
pub const CLASS_EXTENSION: &str = "java";
/// Android manifest patch file
pub const MANIFEST_FILENAME: &str = "AndroidManifest.xml";
/// Gradle build script patch file
pub const GRADLE_FILENAME: &str = "build.gradle";
/// String resources patch file
pub const STRINGS_FILENAME: &str = "strings.xml";

/// Destination for class files
pub const CLASSES_DST: &str =
    "./ExoPlayer/demos/main/src/main/java/com/google/android/exoplayer2/demo/";
/// Destination for the Android manifest
pub const MANIFEST_DST: &str = "./ExoPlayer/demos/main/src/main/";
// Capitalized differently from the two above; kept as found in existing checkouts.
/// Destination for the gradle build script
pub const GRADLE_DST: &str = "./Exoplayer/demos/main/";
/// Destination for string resources
pub const STRINGS_DST: &str = "./Exoplayer/demos/main/src/main/res/values/";
