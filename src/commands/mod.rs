pub mod patch_apply;
