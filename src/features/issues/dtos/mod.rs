mod issue_dto;

pub use issue_dto::{
    CreateIssueDto, IssueImage, IssueListQuery, IssueResponseDto, LikeResponseDto,
    UploadIssueDto,
};
